pub mod black_scholes;
pub mod normal;
pub mod premium;
pub mod spread;
