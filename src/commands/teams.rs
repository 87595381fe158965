use anyhow::Result;

use crate::data_provider::DataProvider;

fn format_teams(teams: &[String]) -> String {
    let mut out = String::from("\nNFL Teams\n=========\n\n");
    for team in teams {
        out.push_str(team);
        out.push('\n');
    }
    out.push_str(&format!("\n{} teams", teams.len()));
    out
}

pub async fn run(provider: &DataProvider) -> Result<()> {
    let teams = provider.list_teams().await?;
    println!("{}", format_teams(&teams));
    Ok(())
}
