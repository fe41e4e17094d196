mod ranking;

pub use ranking::DinnerRanking;
