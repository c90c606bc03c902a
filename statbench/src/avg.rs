use crate::config::AvgConfig;
use crate::error::{Error, Result};

/// Integer mean of `sum` over `count`.
pub fn mean(config: &AvgConfig) -> Result<u64> {
    if config.count == 0 {
        return Err(Error::ZeroCount);
    }
    Ok(config.sum / config.count)
}

pub fn run(config: &AvgConfig) -> Result<()> {
    println!("{}", mean(config)?);
    Ok(())
}
