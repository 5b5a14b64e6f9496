use skyburst::card::{Card, Greeting};
use skyburst::error::CardError;
use skyburst::window::{self, App};
use skyburst::wishes::WishJar;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Where the wish jar lives unless overridden.
const DEFAULT_WISH_FILE: &str = "wishes.json";

struct Args {
    from: Option<String>,
    to: Option<String>,
    seed: Option<u64>,
    wish: Option<String>,
    wish_file: String,
}

fn parse_args() -> Args {
    let mut args = Args {
        from: std::env::var("SKYBURST_FROM").ok(),
        to: std::env::var("SKYBURST_TO").ok(),
        seed: None,
        wish: None,
        wish_file: DEFAULT_WISH_FILE.to_string(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let value = iter.next();
        match (flag.as_str(), value) {
            ("--from", Some(v)) => args.from = Some(v),
            ("--to", Some(v)) => args.to = Some(v),
            ("--seed", Some(v)) => args.seed = v.parse().ok(),
            ("--wish", Some(v)) => args.wish = Some(v),
            ("--wishes-file", Some(v)) => args.wish_file = v,
            (other, _) => {
                eprintln!("unknown or incomplete argument: {other}");
                eprintln!(
                    "usage: skyburst [--from NAME] [--to NAME] [--seed N] \
                     [--wish TEXT] [--wishes-file PATH]"
                );
                std::process::exit(2);
            }
        }
    }
    args
}

fn run() -> Result<(), CardError> {
    let args = parse_args();

    let greeting = Greeting {
        from: args.from.clone(),
        to: args.to,
    };
    let card = Card::new(greeting);
    let wishes = WishJar::load(&args.wish_file)?;

    let mut app = App::new(card, wishes, args.seed);
    if let Some(text) = &args.wish {
        let name = args.from.as_deref().unwrap_or("");
        app.add_wish(name, text)?;
    }

    window::run(app)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}
