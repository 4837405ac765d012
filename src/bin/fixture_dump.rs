//! Materialize the fixture repository and the transaction sample set,
//! dump what a dashboard would consume as JSON lines. Smoke path for the
//! whole crate without any UI attached.

use anyhow::Result;

use lossdev::config::Config;
use lossdev::generate::{resolve_chart_data, sample_bundle};
use lossdev::logging::{json_log, obj, v_num, v_str, Domain};
use lossdev::repo::RepoKind;
use lossdev::transactions::{TransactionFilter, TransactionProvider};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    json_log(
        Domain::System,
        "startup",
        obj(&[("backend", v_str(&cfg.repo_backend))]),
    );

    let repo = RepoKind::from_config(&cfg).build(&cfg)?;

    let options = repo.find_all_completed().await?;
    json_log(
        Domain::Repo,
        "completed_options",
        obj(&[("count", v_num(options.len() as f64))]),
    );
    println!("{}", serde_json::to_string(&options)?);

    if let Some(first) = options.first() {
        let triangle = repo.find_by_name(&first.value).await?;
        let chart = resolve_chart_data(
            triangle.and_then(|t| t.chart_data),
            sample_bundle(),
        );
        println!("{}", serde_json::to_string(&chart)?);
    }

    let provider = TransactionProvider::new();
    let page = provider.list(&TransactionFilter { limit: Some(5), ..Default::default() });
    println!("{}", serde_json::to_string(&page)?);
    println!("{}", serde_json::to_string(&provider.stats())?);

    Ok(())
}
