pub mod attach;
pub mod cleanup;
pub mod environments;
pub mod export;
pub mod generate;
pub mod onboard;
pub mod publish;
