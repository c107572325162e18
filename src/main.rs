use route53_smoke::{
    dns::route53::Route53Api,
    rate_limit::RateLimit,
    settings::Settings,
    smoke::SmokeTest,
    zones::ZoneHelper,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::FmtSubscriber::new();
    tracing::subscriber::set_global_default(subscriber)?;

    let cfg = Settings::new()?;

    run(cfg).await
}

async fn run(cfg: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let limit = RateLimit::new(cfg.rate_limit.requests, cfg.rate_limit.period()?);

    let aws_cfg = aws_config::from_env().load().await;
    let api = Route53Api::new(&aws_cfg);

    let helper = ZoneHelper::new(api, limit).with_zone_config(cfg.zone.into());
    let report = SmokeTest::new(helper).run(&cfg.domain).await?;

    info!(
        zone_id = %report.zone_id,
        records = report.records.len(),
        change_id = %report.deletion.id,
        "zone lifecycle verified"
    );
    Ok(())
}
