pub mod daily_schedule;
pub mod leaderboard;
