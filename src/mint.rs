//! Win-signal relay and mint collaborator interface
//!
//! The session controller publishes [`GameEvent::Victory`]; the relay
//! forwards it to an external mint collaborator at most once per play.
//! The collaborator owns wallet connection and transaction submission and
//! reports its outcome to the user itself; success or failure never flows
//! back into game state.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// On-chain target for the mint, injected at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintConfig {
    /// JSON-RPC endpoint of the target chain
    pub rpc_endpoint: String,
    pub chain_id: u64,
    /// Deployed prize contract
    pub contract_address: String,
    /// ABI fragment of the mint entry point
    pub mint_abi: String,
}

impl MintConfig {
    pub fn new(
        rpc_endpoint: impl Into<String>,
        chain_id: u64,
        contract_address: impl Into<String>,
        mint_abi: impl Into<String>,
    ) -> Self {
        Self {
            rpc_endpoint: rpc_endpoint.into(),
            chain_id,
            contract_address: contract_address.into(),
            mint_abi: mint_abi.into(),
        }
    }
}

/// Fire-and-forget mint submission
///
/// Implementations connect a wallet, submit the transaction, await
/// confirmation, and surface the result to the user. The session never
/// blocks on this and never retries it.
pub trait MintCollaborator {
    fn submit_mint(&mut self, config: &MintConfig, prize_id: u32);
}

/// Stand-in collaborator that only logs the dispatch; the host swaps in a
/// wallet-backed implementation
#[derive(Debug, Default)]
pub struct LogMint;

impl MintCollaborator for LogMint {
    fn submit_mint(&mut self, config: &MintConfig, prize_id: u32) {
        log::info!(
            "mint requested for prize {prize_id}: {} on chain {} via {}",
            config.contract_address,
            config.chain_id,
            config.rpc_endpoint,
        );
    }
}

/// Subscribes to session events and dispatches the win signal
///
/// `Victory` is forwarded to the collaborator at most once per play;
/// `SessionReset` re-arms the relay for the next one.
pub struct WinRelay<M> {
    config: MintConfig,
    collaborator: M,
    delivered: bool,
}

impl<M: MintCollaborator> WinRelay<M> {
    pub fn new(config: MintConfig, collaborator: M) -> Self {
        Self {
            config,
            collaborator,
            delivered: false,
        }
    }

    /// Feed one session event through the relay
    pub fn observe(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Victory { prize_id } if !self.delivered => {
                self.delivered = true;
                self.collaborator.submit_mint(&self.config, prize_id);
            }
            GameEvent::SessionReset => self.delivered = false,
            _ => {}
        }
    }

    /// Manually re-arm, for hosts that rebuild the session without a reset
    /// event
    pub fn reset(&mut self) {
        self.delivered = false;
    }

    pub fn delivered(&self) -> bool {
        self.delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingMint {
        minted: Vec<u32>,
    }

    impl MintCollaborator for CountingMint {
        fn submit_mint(&mut self, _config: &MintConfig, prize_id: u32) {
            self.minted.push(prize_id);
        }
    }

    fn relay() -> WinRelay<CountingMint> {
        let config = MintConfig::new(
            "https://rpc.example.org",
            1,
            "0x0000000000000000000000000000000000000000",
            "function mintPrize() public",
        );
        WinRelay::new(config, CountingMint::default())
    }

    #[test]
    fn test_victory_dispatches_once() {
        let mut relay = relay();

        relay.observe(&GameEvent::Victory { prize_id: 3 });
        relay.observe(&GameEvent::Victory { prize_id: 3 });
        relay.observe(&GameEvent::Victory { prize_id: 7 });

        assert_eq!(relay.collaborator.minted, vec![3]);
        assert!(relay.delivered());
    }

    #[test]
    fn test_reset_rearms_relay() {
        let mut relay = relay();

        relay.observe(&GameEvent::Victory { prize_id: 1 });
        relay.observe(&GameEvent::SessionReset);
        relay.observe(&GameEvent::Victory { prize_id: 2 });

        assert_eq!(relay.collaborator.minted, vec![1, 2]);
    }

    #[test]
    fn test_other_events_ignored() {
        let mut relay = relay();

        relay.observe(&GameEvent::SessionStarted);
        relay.observe(&GameEvent::PrizeGrabbed { prize_id: 1 });
        relay.observe(&GameEvent::GrabMissed);
        relay.observe(&GameEvent::PrizeReleased { prize_id: 1 });

        assert!(relay.collaborator.minted.is_empty());
        assert!(!relay.delivered());
    }
}
