//! Claw Grab entry point
//!
//! Headless demo driver: runs a scripted play session against the
//! simulation and relays the win signal to the logging mint collaborator.
//!
//! Usage: `claw-grab [seed] [session-config.json]`

use claw_grab::consts::SIM_DT;
use claw_grab::mint::{LogMint, MintConfig, WinRelay};
use claw_grab::sim::{SessionConfig, SessionPhase, SessionState, TickInput, tick};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC1A6_60AB);
    let config = load_session_config(args.next());

    let mint_config = MintConfig::new(
        std::env::var("CLAW_RPC_ENDPOINT").unwrap_or_else(|_| "https://rpc.ankr.com/eth".into()),
        std::env::var("CLAW_CHAIN_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1),
        std::env::var("CLAW_CONTRACT")
            .unwrap_or_else(|_| "0x7eFC729a41FC7073dE028712b0FB3950F735f9ca".into()),
        "function mintPrize() public",
    );

    let mut state = SessionState::new(seed, config);
    let mut relay = WinRelay::new(mint_config, LogMint);
    let mut press_cooldown = 0u32;

    log::info!("starting session with seed {seed}");

    // Two minutes of simulated time is far more than one cycle needs
    let max_ticks = (120.0 / SIM_DT) as u64;
    for _ in 0..max_ticks {
        let input = autopilot(&state, &mut press_cooldown);
        tick(&mut state, &input, SIM_DT);

        for event in state.take_events() {
            log::info!("event: {event:?}");
            relay.observe(&event);
        }

        if state.phase == SessionPhase::Won && relay.delivered() {
            log::info!("session won after {} ticks", state.time_ticks);
            return;
        }
    }

    log::warn!("session did not finish, stuck in {:?}", state.phase);
}

fn load_session_config(path: Option<String>) -> SessionConfig {
    let Some(path) = path else {
        return SessionConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("bad session config {path}: {err}; using defaults");
                SessionConfig::default()
            }
        },
        Err(err) => {
            log::warn!("cannot read {path}: {err}; using defaults");
            SessionConfig::default()
        }
    }
}

/// Scripted player: drop on the first prize, carry it to the zone, release
fn autopilot(state: &SessionState, press_cooldown: &mut u32) -> TickInput {
    if *press_cooldown > 0 {
        *press_cooldown -= 1;
    }
    let mut input = TickInput::default();

    match state.phase {
        SessionPhase::Idle => {
            if *press_cooldown == 0 {
                input.press = true;
                *press_cooldown = 30;
            }
        }
        SessionPhase::Playing => {
            if let Some(prize) = state.prizes.first() {
                input.pointer_x = Some(prize.pos.x);
                let pool_settled = state.prizes.iter().all(|p| p.vel.length() < 1.0);
                let aligned = (state.claw.pos.x - prize.pos.x).abs() < 1.0;
                if pool_settled && aligned && *press_cooldown == 0 {
                    input.press = true;
                    *press_cooldown = 30;
                }
            }
        }
        SessionPhase::Holding => {
            let target = state.config.zone.center().x;
            input.pointer_x = Some(target);
            if (state.claw.pos.x - target).abs() < 1.0 && *press_cooldown == 0 {
                input.press = true;
                *press_cooldown = 30;
            }
        }
        // Travel legs and the release ignore input anyway
        _ => {}
    }

    input
}
