pub mod m160;
pub mod secp160r1;
pub mod tiny;
