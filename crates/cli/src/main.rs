use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wicket_core::{
    draw_rarity, Clock, CollectionFilter, CollectionStats, EventBus, GameState, PackDef, Player,
    Rarity, RevealSequencer, RngState, Role, SystemClock,
};
use wicket_cui::persistence::SaveStore;
use wicket_cui::{format_event, LaunchOptions, ASSETS_DIR_ENV};
use wicket_data::{load_catalog_or_builtin, Catalog};

const DEFAULT_ODDS_SAMPLES: usize = 100_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    seed: Option<u64>,
    assets_dir: Option<PathBuf>,
    save_path: Option<PathBuf>,
    command: Vec<String>,
}

impl CliOptions {
    fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            seed: self.seed,
            assets_dir: self.assets_dir.clone(),
            save_path: self.save_path.clone(),
        }
    }
}

struct Session {
    catalog: Catalog,
    state: GameState,
    store: SaveStore,
    rng: RngState,
}

impl Session {
    fn open(options: &CliOptions) -> Result<Self> {
        let catalog = load_catalog_or_builtin(options.assets_dir.as_deref())?;
        let store = match options.save_path.as_ref() {
            Some(path) => SaveStore::new(Some(path.clone())),
            None => SaveStore::from_env(),
        };
        let rng = match options.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        let state = store.load_or_default(catalog.rules.starting_coins);
        debug!(seed = rng.seed(), coins = state.coins, "session ready");
        Ok(Self {
            catalog,
            state,
            store,
            rng,
        })
    }

    fn pack(&self, id: &str) -> Result<PackDef> {
        self.catalog.pack_by_id(id).cloned().ok_or_else(|| {
            let known: Vec<&str> = self.catalog.packs.iter().map(|p| p.id.as_str()).collect();
            anyhow!("unknown pack '{id}' (known: {})", known.join(", "))
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OddsRow {
    rarity: Rarity,
    authored: f64,
    observed: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OddsReport {
    pack: String,
    samples: usize,
    rows: Vec<OddsRow>,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        assets_dir: std::env::var(ASSETS_DIR_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from),
        ..CliOptions::default()
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    options.assets_dir = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--save" => {
                if let Some(value) = args.get(idx + 1) {
                    options.save_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            other => options.command.push(other.to_string()),
        }
        idx += 1;
    }
    options
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if options.command.first().map(String::as_str) == Some("tui") {
        if let Err(err) = wicket_cui::run(options.launch_options()) {
            eprintln!("tui launch error: {err:#}");
            std::process::exit(1);
        }
        return;
    }
    init_tracing();
    let result = Session::open(&options).and_then(|mut session| {
        if options.command.is_empty() {
            run_repl(&mut session)
        } else {
            let words: Vec<&str> = options.command.iter().map(String::as_str).collect();
            execute(&mut session, &words).map(|_| ())
        }
    });
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run_repl(session: &mut Session) -> Result<()> {
    println!("Wicket Wonders. Type 'help' for commands, 'quit' to leave.");
    print_status(session);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("wicket [{} coins]> ", session.state.coins);
        io::stdout().flush().context("flush prompt")?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("read command")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        match execute(session, &words) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => println!("error: {err:#}"),
        }
    }
    Ok(())
}

/// Run one command. Returns `false` when the caller should stop.
fn execute(session: &mut Session, words: &[&str]) -> Result<bool> {
    let Some((cmd, args)) = words.split_first() else {
        return Ok(true);
    };
    match *cmd {
        "help" | "h" | "?" => print_help(),
        "quit" | "exit" | "q" => return Ok(false),
        "status" | "s" => print_status(session),
        "packs" | "p" => print_packs(session),
        "open" | "o" => {
            let instant = args.contains(&"--instant");
            let pack_id = args
                .iter()
                .find(|arg| !arg.starts_with("--"))
                .ok_or_else(|| anyhow!("usage: open <pack> [--instant]"))?;
            open_pack(session, pack_id, instant)?;
        }
        "collection" | "c" => {
            let filter = parse_collection_filter(args)?;
            print_collection(&session.state, &filter);
        }
        "odds" => {
            let json = args.contains(&"--json");
            let rest: Vec<&str> = args
                .iter()
                .copied()
                .filter(|arg| !arg.starts_with("--"))
                .collect();
            let pack_id = rest
                .first()
                .ok_or_else(|| anyhow!("usage: odds <pack> [samples] [--json]"))?;
            let samples = match rest.get(1) {
                Some(value) => value
                    .parse::<usize>()
                    .with_context(|| format!("invalid sample count '{value}'"))?,
                None => DEFAULT_ODDS_SAMPLES,
            };
            let pack = session.pack(pack_id)?;
            let report = simulate_odds(&pack, samples, &mut session.rng);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("encode odds report")?
                );
            } else {
                print_odds(&report);
            }
        }
        "reset" => {
            session.state.reset(session.catalog.rules.starting_coins);
            session.store.clear();
            info!("progress reset");
            println!("progress reset: {} coins", session.state.coins);
        }
        "tui" => bail!("'tui' must be the first command line argument"),
        other => bail!("unknown command '{other}', try 'help'"),
    }
    Ok(true)
}

fn open_pack(session: &mut Session, pack_id: &str, instant: bool) -> Result<()> {
    let pack = session.pack(pack_id)?;
    if !session.state.can_afford(pack.price) {
        bail!(
            "not enough coins for {} ({} needed, {} held)",
            pack.name,
            pack.price,
            session.state.coins
        );
    }
    let clock = SystemClock::new();
    let mut events = EventBus::default();
    let mut opening = RevealSequencer::begin(
        &pack,
        &session.catalog.pool,
        &mut session.rng,
        session.catalog.rules.timings,
        &mut session.state,
        &mut events,
        clock.now_ms(),
    )?;
    session.store.save(&session.state);
    info!(pack = %pack.id, coins = session.state.coins, "pack opened");
    print_events(&mut events);

    if instant {
        opening.run_to_completion(&mut session.state, &mut events);
        session.store.save(&session.state);
        print_events(&mut events);
    } else {
        while let Some(due) = opening.next_due() {
            let wait = due.saturating_sub(clock.now_ms());
            if wait > 0 {
                std::thread::sleep(Duration::from_millis(wait));
            }
            if opening.tick(clock.now_ms(), &mut session.state, &mut events) > 0 {
                session.store.save(&session.state);
                print_events(&mut events);
            }
        }
    }
    println!("{} coins left", session.state.coins);
    Ok(())
}

fn simulate_odds(pack: &PackDef, samples: usize, rng: &mut RngState) -> OddsReport {
    let mut counts: BTreeMap<Rarity, usize> = BTreeMap::new();
    for _ in 0..samples {
        *counts
            .entry(draw_rarity(&pack.rarity_odds, rng))
            .or_insert(0) += 1;
    }
    let rows = Rarity::ALL
        .iter()
        .rev()
        .map(|rarity| {
            let hits = counts.get(rarity).copied().unwrap_or(0);
            let observed = if samples == 0 {
                0.0
            } else {
                hits as f64 * 100.0 / samples as f64
            };
            OddsRow {
                rarity: *rarity,
                authored: pack.rarity_odds.get(*rarity),
                observed,
            }
        })
        .collect();
    OddsReport {
        pack: pack.id.clone(),
        samples,
        rows,
    }
}

fn parse_collection_filter(args: &[&str]) -> Result<CollectionFilter> {
    let mut filter = CollectionFilter::default();
    let mut query = Vec::new();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx] {
            "--rarity" => {
                let value = args
                    .get(idx + 1)
                    .ok_or_else(|| anyhow!("--rarity needs a value"))?;
                filter.rarity = Some(
                    Rarity::from_keyword(value)
                        .ok_or_else(|| anyhow!("unknown rarity '{value}'"))?,
                );
                idx += 1;
            }
            "--role" => {
                let value = args
                    .get(idx + 1)
                    .ok_or_else(|| anyhow!("--role needs a value"))?;
                filter.role =
                    Some(Role::from_keyword(value).ok_or_else(|| anyhow!("unknown role '{value}'"))?);
                idx += 1;
            }
            word => query.push(word),
        }
        idx += 1;
    }
    filter.query = query.join(" ");
    Ok(filter)
}

fn print_help() {
    println!("== Commands ==");
    println!("status                         coins, cards and packs opened");
    println!("packs                          list packs with price and odds");
    println!("open <pack> [--instant]        buy and open a pack");
    println!("collection [--rarity r] [--role r] [query]");
    println!("                               browse owned cards");
    println!("odds <pack> [samples] [--json] sample the rarity table");
    println!("reset                          start over with fresh coins");
    println!("tui                            full-screen terminal UI (first argument only)");
    println!("quit                           leave the prompt");
    println!("global: --seed <n> --assets <dir> --save <path>");
}

fn print_status(session: &Session) {
    println!("== Status ==");
    println!(
        "Coins {} | Cards {} | Packs opened {}",
        session.state.coins,
        session.state.collection.len(),
        session.state.packs_opened
    );
    match session.store.path() {
        Some(path) => println!("Save file: {}", path.display()),
        None => println!("Save file: disabled"),
    }
}

fn print_packs(session: &Session) {
    println!("== Packs ==");
    for pack in &session.catalog.packs {
        let marker = if session.state.can_afford(pack.price) {
            " "
        } else {
            "x"
        };
        println!(
            "{marker} {:<8} {:<12} {:>6} coins  {} cards  L {}% E {}% R {}% C {}%",
            pack.id,
            pack.name,
            pack.price,
            pack.card_count,
            pack.rarity_odds.legendary,
            pack.rarity_odds.epic,
            pack.rarity_odds.rare,
            pack.rarity_odds.common
        );
    }
}

fn print_collection(state: &GameState, filter: &CollectionFilter) {
    let stats = CollectionStats::from_cards(&state.collection);
    println!("== Collection ==");
    let counts: Vec<String> = Rarity::ALL
        .iter()
        .rev()
        .map(|rarity| format!("{} {}", rarity.label(), stats.count(*rarity)))
        .collect();
    println!(
        "Total {} | Unique {} | {}",
        stats.total,
        stats.unique,
        counts.join(" | ")
    );
    let cards = filter.apply(&state.collection);
    if cards.is_empty() {
        println!("(no cards)");
        return;
    }
    for (idx, player) in cards.iter().enumerate() {
        println!("{}", card_line(idx, player));
    }
}

fn print_odds(report: &OddsReport) {
    println!("== Odds {} ({} samples) ==", report.pack, report.samples);
    for row in &report.rows {
        println!(
            "{:<10} authored {:>6.2}%  observed {:>6.2}%",
            row.rarity.label(),
            row.authored,
            row.observed
        );
    }
}

fn print_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("{}", format_event(&event));
    }
}

fn card_line(idx: usize, player: &Player) -> String {
    format!(
        "{:>3}. {:<10} {:<18} {:<4} {:<14} {:>3}",
        idx + 1,
        player.rarity.label(),
        player.name,
        player.role.code(),
        player.team,
        player.rating
    )
}
