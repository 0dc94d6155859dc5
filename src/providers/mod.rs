pub mod coinbase;
pub mod util;

pub use coinbase::CoinbaseProvider;
