use anyhow::Result;

use crate::data_provider::DataProvider;

pub fn run(provider: &DataProvider) -> Result<()> {
    println!("{}", provider.list_years().join("\n"));
    Ok(())
}
