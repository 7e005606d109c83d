use battle_engine::core::battle::{
    is_battle_over, keep_current_combatant, open_switch_window, resolve_round, select_combatant,
    select_opponent,
};
use battle_engine::core::scoring::battle_summary;
use battle_engine::core::state::{create_battle_state, BattleResult, BattleState, Combatant, PhaseKind, Side};
use battle_engine::core::utils::{available_indices, roster_for};
use battle_engine::data::type_chart::effectiveness;
use battle_engine::error::{Error, Result};
use battle_engine::tools::config::BattleConfig;
use battle_engine::tools::leaderboard::{Leaderboard, LeaderboardEntry, RECENT_LIMIT};
use battle_engine::tools::pokeapi::PokeApiClient;
use battle_engine::tools::roster_store::RosterStore;
use chrono::Utc;
use inquire::Select;
use rand::Rng;
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "battle.yaml";
const LEADERBOARD_SIZE: usize = 10;

enum Command {
    RosterAdd(u32),
    RosterRemove(u32),
    RosterClear,
    RosterShow,
    Battle,
    Leaderboard,
    LeaderboardRecent,
}

fn parse_command(args: &[String]) -> Option<Command> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["battle"] => Some(Command::Battle),
        ["leaderboard"] => Some(Command::Leaderboard),
        ["leaderboard", "recent"] => Some(Command::LeaderboardRecent),
        ["roster"] | ["roster", "show"] => Some(Command::RosterShow),
        ["roster", "clear"] => Some(Command::RosterClear),
        ["roster", "add", id] => id.parse().ok().map(Command::RosterAdd),
        ["roster", "remove", id] => id.parse().ok().map(Command::RosterRemove),
        _ => None,
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  battle-cli [battle]");
    println!("  battle-cli roster [show]");
    println!("  battle-cli roster add <id>");
    println!("  battle-cli roster remove <id>");
    println!("  battle-cli roster clear");
    println!("  battle-cli leaderboard [recent]");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("battle_engine=info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = parse_command(&args) else {
        print_usage();
        std::process::exit(2);
    };

    if let Err(e) = run(command).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    let config = BattleConfig::load(CONFIG_PATH)?;
    tracing::debug!(?config, "configuration loaded");

    match command {
        Command::RosterAdd(id) => {
            let mut store = RosterStore::open(&config.roster_path)?;
            store.add(id)?;
            print_roster(&store);
        }
        Command::RosterRemove(id) => {
            let mut store = RosterStore::open(&config.roster_path)?;
            store.remove(id)?;
            print_roster(&store);
        }
        Command::RosterClear => {
            let mut store = RosterStore::open(&config.roster_path)?;
            store.clear()?;
            print_roster(&store);
        }
        Command::RosterShow => {
            let store = RosterStore::open(&config.roster_path)?;
            print_roster(&store);
        }
        Command::Leaderboard => {
            let board = Leaderboard::open(&config.leaderboard_path)?;
            print_leaderboard(&board);
        }
        Command::LeaderboardRecent => {
            let board = Leaderboard::open(&config.leaderboard_path)?;
            print_recent(&board);
        }
        Command::Battle => battle(&config).await?,
    }
    Ok(())
}

fn print_roster(store: &RosterStore) {
    let info = store.info();
    println!("📋 Roster ({} / {}):", info.size, info.size + info.empty_slots);
    if info.ids.is_empty() {
        println!("  (empty)");
    }
    for (i, id) in info.ids.iter().enumerate() {
        println!("  {}. #{}", i + 1, id);
    }
    if info.is_full {
        println!("  Roster is full.");
    }
}

fn print_leaderboard(board: &Leaderboard) {
    println!("🏆 Leaderboard");
    println!("─────────────────────────────────────────");
    if board.entries().is_empty() {
        println!("  No battles won yet.");
    }
    for (rank, entry) in board.top(LEADERBOARD_SIZE).iter().enumerate() {
        println!(
            "  {:>2}. {:<12} {:>5}  {} vs {}  ({})",
            rank + 1,
            entry.trainer_name,
            entry.score,
            entry.leader_name,
            entry.opponent_name,
            entry.timestamp.format("%Y-%m-%d %H:%M")
        );
    }
    let stats = board.stats();
    println!("─────────────────────────────────────────");
    println!(
        "  Battles: {} | Victories: {} | Best score: {}",
        stats.total_battles, stats.victories, stats.highest_score
    );
}

fn print_recent(board: &Leaderboard) {
    println!("🕒 Recent battles");
    println!("─────────────────────────────────────────");
    let recent = board.recent(RECENT_LIMIT);
    if recent.is_empty() {
        println!("  No battles recorded yet.");
    }
    for entry in recent {
        println!(
            "  {}  {:<12} {:>5}  #{}  {} vs {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.trainer_name,
            entry.score,
            board.rank_of(entry).unwrap_or(0),
            entry.leader_name,
            entry.opponent_name
        );
    }
}

async fn battle(config: &BattleConfig) -> Result<()> {
    let store = RosterStore::open(&config.roster_path)?;
    if store.is_empty() {
        return Err(Error::EmptyRoster);
    }

    let client = PokeApiClient::new(config.catalog_url.clone());
    let mut thread_rng = rand::thread_rng();
    let mut rng = move || thread_rng.gen::<f64>();

    println!("⏳ Loading combatants...");
    let player_roster = client.fetch_roster(store.ids()).await?;
    let opponent_roster = client
        .fetch_team(&mut rng, config.team_size, config.max_catalog_id)
        .await?;

    println!();
    println!("✅ Your team: {}", team_names(&player_roster));
    println!("🤖 Opponent team: {}", team_names(&opponent_roster));
    println!();
    println!("════════════════════════════════════════");
    println!("            ⚔️  Battle start! ⚔️");
    println!("════════════════════════════════════════");

    let mut state = create_battle_state(player_roster, opponent_roster);
    let mut last_log_idx = 0;

    while !is_battle_over(&state) {
        print_new_logs(&state, &mut last_log_idx);

        let next = match state.phase_kind() {
            PhaseKind::PlayerSelection | PhaseKind::PlayerFainted => {
                let index = prompt_combatant(&state, "Choose your combatant:")?;
                select_combatant(&state, index)
            }
            PhaseKind::OpponentSelection => select_opponent(&state),
            PhaseKind::OpponentFainted => {
                if prompt_switch_window(&state)? {
                    open_switch_window(&state)
                } else {
                    select_opponent(&state)
                }
            }
            PhaseKind::PlayerSwitch => {
                let index = prompt_combatant(&state, "Switch to:")?;
                select_combatant(&state, index)
            }
            PhaseKind::Battle => {
                print_battle_status(&state);
                match state.turn() {
                    Side::Player => {
                        let move_type = prompt_move_type(&state)?;
                        resolve_round(&state, Some(&move_type), &mut rng)
                    }
                    Side::Opponent => {
                        println!("🤖 The opponent attacks...");
                        resolve_round(&state, None, &mut rng)
                    }
                }
            }
            PhaseKind::Result => break,
        };

        if next == state {
            tracing::warn!(phase = ?state.phase_kind(), "transition made no progress");
        }
        state = next;

        if config.pacing_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.pacing_ms)).await;
        }
    }

    print_new_logs(&state, &mut last_log_idx);
    finish(config, &state)
}

fn finish(config: &BattleConfig, state: &BattleState) -> Result<()> {
    let summary = battle_summary(state);
    println!();
    println!("════════════════════════════════════════");
    match summary.result {
        BattleResult::Win => println!("      🎉 You win! Score: {} 🎉", summary.score),
        _ => println!("      💔 You lost... better luck next time!"),
    }
    println!("  Leader: {} | Last opponent: {}", summary.leader_name, summary.opponent_name);
    println!("════════════════════════════════════════");

    if let Some(entry) = LeaderboardEntry::from_summary(&config.trainer_name, &summary, Utc::now()) {
        let mut board = Leaderboard::open(&config.leaderboard_path)?;
        let rank = board.submit(entry)?;
        println!("🏆 You're ranked #{} on the leaderboard!", rank);
    }
    Ok(())
}

fn team_names(roster: &[Combatant]) -> String {
    roster.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", ")
}

fn print_new_logs(state: &BattleState, last_idx: &mut usize) {
    for line in state.log.iter().skip(*last_idx) {
        println!("  📝 {}", line);
    }
    *last_idx = state.log.len();
}

fn print_battle_status(state: &BattleState) {
    println!("─────────────────────────────────────────");
    if let Some(opponent) = state.current_opponent() {
        println!("  [Opponent] {} ({}) {}", opponent.name, opponent.types.join("/"), hp_bar_string(opponent));
    }
    if let Some(player) = state.current_player() {
        println!("  [You]      {} ({}) {}", player.name, player.types.join("/"), hp_bar_string(player));
    }
    let remaining = |side| available_indices(roster_for(state, side)).len();
    println!(
        "  Standing: you {} | opponent {}",
        remaining(Side::Player),
        remaining(Side::Opponent)
    );
    println!();
}

fn hp_bar_string(combatant: &Combatant) -> String {
    let ratio = if combatant.max_hp == 0 {
        0.0
    } else {
        combatant.current_hp as f64 / combatant.max_hp as f64
    };
    let bars = ((ratio * 10.0) as usize).min(10);
    format!(
        "[{}{}] {}/{}",
        "█".repeat(bars),
        "░".repeat(10 - bars),
        combatant.current_hp,
        combatant.max_hp
    )
}

/// Roster index of the chosen standing combatant.
fn prompt_combatant(state: &BattleState, message: &str) -> Result<usize> {
    let indices = available_indices(&state.player_roster);
    let options: Vec<String> = indices
        .iter()
        .map(|&i| {
            let c = &state.player_roster[i];
            format!("{} ({}) HP: {}/{}", c.name, c.types.join("/"), c.current_hp, c.max_hp)
        })
        .collect();

    let choice = Select::new(message, options).raw_prompt()?;
    Ok(indices[choice.index])
}

/// True when the player wants to switch after an opponent faint.
fn prompt_switch_window(state: &BattleState) -> Result<bool> {
    let keep = match state.current_player() {
        Some(player) => format!("Keep {}", player.name),
        None => "Keep current combatant".to_string(),
    };
    let options = vec![keep, "Switch combatants".to_string()];
    let choice = Select::new("The opponent is sending out a new combatant.", options).raw_prompt()?;
    Ok(choice.index == 1)
}

fn prompt_move_type(state: &BattleState) -> Result<String> {
    let (Some(player), Some(opponent)) = (state.current_player(), state.current_opponent()) else {
        return Ok("normal".to_string());
    };
    let mut types = player.types.clone();
    if types.is_empty() {
        types.push(player.primary_type().to_string());
    }
    let options: Vec<String> = types
        .iter()
        .map(|t| format!("{} attack (x{})", t, effectiveness(t, &opponent.types)))
        .collect();

    let choice = Select::new("Choose an attack type:", options)
        .with_page_size(4)
        .raw_prompt()?;
    Ok(types[choice.index].clone())
}
