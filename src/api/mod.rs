pub mod clob;
pub mod gamma;
pub mod openfootball;

pub use clob::{BestAsks, ClobClient};
pub use gamma::GammaClient;
pub use openfootball::OpenFootballClient;
