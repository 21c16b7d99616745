//! Dashboard panels
//!
//! - Progress: contest progress gauge
//! - Podium: top five metric cards
//! - Chart: percent change per pick over time
//! - Leaderboard: ranking table (Ranking tab)
//! - DataTable: percent-change matrix (Data tab)

pub mod chart;
pub mod data_table;
pub mod leaderboard;
pub mod podium;
pub mod progress;

pub use chart::ChartPanel;
pub use data_table::DataTablePanel;
pub use leaderboard::LeaderboardPanel;
pub use podium::PodiumPanel;
pub use progress::ProgressPanel;
