use replay_stats::stats::format::format_margin_bucket;
use replay_stats::{CarFilter, PlayerId, PlayerReport, ReplayClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(profile_url), Some(name)) = (args.next(), args.next()) else {
        eprintln!("usage: summary <profile-url> <player-name> [backend-url]");
        std::process::exit(2);
    };
    let backend = args.next().unwrap_or_else(|| "http://localhost:3000".to_owned());

    let player = match PlayerId::from_profile_url(&profile_url) {
        Ok(player) => player,
        Err(err) => {
            eprintln!("Not a player profile link: {err}");
            std::process::exit(2);
        }
    };
    let client = ReplayClient::new(backend);
    let replays = match client.fetch_replays(&player).await {
        Ok(replays) => replays,
        Err(err) => {
            eprintln!("A network error was encountered: {err}");
            std::process::exit(1);
        }
    };

    let report = PlayerReport::new(&replays, &name);
    println!("{name}'s games ({player}):");
    for line in report.summary_lines() {
        println!("  {line}");
    }

    println!("goal margins:");
    for (bucket, count) in report.margin_histogram().iter() {
        println!("  {:<12} {count}", format_margin_bucket(bucket));
    }

    for car in report.used_cars() {
        let per_car = report.with_car(CarFilter::Car(car.clone()));
        if let Some(core) = per_car.core_averages() {
            println!(
                "{car}: {} games, {:.2} goals, {:.2} saves, {:.2} score",
                per_car.games().len(),
                core.goals,
                core.saves,
                core.score
            );
        }
    }
}
