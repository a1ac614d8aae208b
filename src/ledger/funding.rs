//! The funding ledger state machine.
//!
//! ## State
//!
//! - `address_to_amount`: cumulative contribution per address
//! - `funders`: every accepted contribution's sender, in call order
//! - `balance`: native value currently held
//!
//! The map and the sequence are two views of the same history and are only
//! ever mutated together. `balance` always equals the sum of the map.
//!
//! ## Lifecycle
//!
//! ```text
//! Unfunded --contribute--> Funded --contribute--> Funded
//!     ^                                             |
//!     +------------- withdraw (owner, global) ------+
//! ```
//!
//! Every call validates first and commits last, so a failing call leaves the
//! ledger untouched.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{LedgerError, Result};
use crate::ledger::config::LedgerConfig;
use crate::ledger::conversion::{minimum_contribution, usd_value};
use crate::oracle::PriceFeed;
use crate::types::{compute_hash, Address, ContributionReceipt, WithdrawalReceipt};
use crate::wallets::ValueSink;

/// State root of a ledger with no contributions since construction or the
/// last withdrawal.
pub const EMPTY_ROOT: [u8; 32] = [0u8; 32];

/// Owner-withdrawable contribution ledger.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use funding_ledger::ledger::FundingLedger;
/// use funding_ledger::oracle::MockV3Aggregator;
/// use funding_ledger::types::{amount::to_wei, Address};
/// use funding_ledger::wallets::Wallets;
///
/// let owner = Address::from_seed(b"deployer");
/// let alice = Address::from_seed(b"alice");
/// let mut ledger = FundingLedger::new(owner, Arc::new(MockV3Aggregator::default()));
///
/// ledger.contribute(alice, to_wei("0.001").unwrap()).unwrap();
/// assert_eq!(ledger.funder(0).unwrap(), alice);
///
/// let mut wallets = Wallets::new();
/// let receipt = ledger.withdraw(owner, &mut wallets).unwrap();
/// assert_eq!(wallets.balance_of(&owner), receipt.amount);
/// assert_eq!(ledger.balance(), 0);
/// ```
pub struct FundingLedger {
    owner: Address,
    price_feed: Arc<dyn PriceFeed>,
    config: LedgerConfig,
    address_to_amount: HashMap<Address, u128>,
    funders: Vec<Address>,
    balance: u128,
    state_root: [u8; 32],
}

impl FundingLedger {
    /// Create a ledger owned by `owner` with the default 1 USD minimum.
    pub fn new(owner: Address, price_feed: Arc<dyn PriceFeed>) -> Self {
        Self::with_config(owner, price_feed, LedgerConfig::default())
    }

    /// Create a ledger with explicit parameters.
    pub fn with_config(owner: Address, price_feed: Arc<dyn PriceFeed>, config: LedgerConfig) -> Self {
        info!(
            owner = %owner,
            feed = %price_feed.address(),
            minimum_usd = config.minimum_usd,
            "ledger deployed"
        );
        Self {
            owner,
            price_feed,
            config,
            address_to_amount: HashMap::new(),
            funders: Vec::new(),
            balance: 0,
            state_root: EMPTY_ROOT,
        }
    }

    // ========================================================================
    // Entry Points
    // ========================================================================

    /// Accept `value` wei from `sender`.
    ///
    /// The oracle is read once. The contribution must be worth at least the
    /// configured minimum; a zero value is always rejected.
    ///
    /// Repeat contributions accumulate in the map and append another entry
    /// to the funder sequence.
    ///
    /// # Errors
    ///
    /// * `InsufficientContribution` - below the USD floor
    /// * `InvalidPrice` - the oracle answer is not positive
    /// * `Overflow` - the balance or a running total would exceed `u128`
    pub fn contribute(&mut self, sender: Address, value: u128) -> Result<ContributionReceipt> {
        let data = self.price_feed.latest_price();
        let usd = usd_value(value, data)?;
        let minimum = self.config.minimum_usd;

        if value == 0 || usd < minimum {
            debug!(sender = %sender, value, usd, minimum, "contribution rejected");
            return Err(LedgerError::InsufficientContribution {
                usd_value: usd,
                minimum,
            });
        }

        let previous = self.address_to_amount(&sender);
        let sender_total = previous.checked_add(value).ok_or(LedgerError::Overflow)?;
        let balance = self.balance.checked_add(value).ok_or(LedgerError::Overflow)?;

        // Commit
        let funder_index = self.funders.len() as u64;
        self.address_to_amount.insert(sender, sender_total);
        self.funders.push(sender);
        self.balance = balance;
        self.state_root = Self::next_root(&self.state_root, &sender, value);

        info!(sender = %sender, value, usd, sender_total, funder_index, "contribution accepted");

        Ok(ContributionReceipt::new(
            sender,
            value,
            usd,
            sender_total,
            funder_index,
            self.state_root,
        ))
    }

    /// Plain value transfer into the ledger.
    ///
    /// Routed through [`contribute`](Self::contribute) so that no value is
    /// ever held without being accounted for.
    pub fn receive(&mut self, sender: Address, value: u128) -> Result<ContributionReceipt> {
        self.contribute(sender, value)
    }

    /// Transfer the entire balance to the owner and reset the ledger.
    ///
    /// The transfer happens before any state is touched. If the sink refuses
    /// the credit, the ledger is left exactly as it was.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - `caller` is not the owner
    /// * `Transfer` - the sink refused the credit
    pub fn withdraw<S>(&mut self, caller: Address, sink: &mut S) -> Result<WithdrawalReceipt>
    where
        S: ValueSink + ?Sized,
    {
        if caller != self.owner {
            warn!(caller = %caller, owner = %self.owner, "withdraw rejected: not owner");
            return Err(LedgerError::Unauthorized { caller });
        }

        let amount = self.balance;
        sink.credit(&self.owner, amount).map_err(|e| {
            warn!(owner = %self.owner, amount, error = %e, "withdraw transfer failed");
            LedgerError::from(e)
        })?;

        let funders_cleared = self.funders.len() as u64;
        self.address_to_amount.clear();
        self.funders.clear();
        self.balance = 0;
        self.state_root = EMPTY_ROOT;

        info!(owner = %self.owner, amount, funders_cleared, "withdrawal complete");

        Ok(WithdrawalReceipt::new(
            self.owner,
            amount,
            funders_cleared,
            self.state_root,
        ))
    }

    // ========================================================================
    // Read Accessors
    // ========================================================================

    /// Address of the bound price feed
    pub fn price_feed(&self) -> Address {
        self.price_feed.address()
    }

    /// Cumulative contribution of `funder`, zero if unknown
    pub fn address_to_amount(&self, funder: &Address) -> u128 {
        self.address_to_amount.get(funder).copied().unwrap_or(0)
    }

    /// Sender of the `index`-th accepted contribution
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index >= funder_count()`, which is always the
    /// case right after a withdrawal.
    pub fn funder(&self, index: usize) -> Result<Address> {
        self.funders
            .get(index)
            .copied()
            .ok_or(LedgerError::IndexOutOfRange {
                index,
                len: self.funders.len(),
            })
    }

    #[inline]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Native value currently held
    #[inline]
    pub fn balance(&self) -> u128 {
        self.balance
    }

    #[inline]
    pub fn funder_count(&self) -> usize {
        self.funders.len()
    }

    #[inline]
    pub fn funders(&self) -> &[Address] {
        &self.funders
    }

    #[inline]
    pub fn minimum_usd(&self) -> u128 {
        self.config.minimum_usd
    }

    /// Sum of all map entries; equal to `balance()`
    pub fn total_contributed(&self) -> u128 {
        self.address_to_amount.values().sum()
    }

    /// Smallest contribution accepted at the feed's current price
    pub fn minimum_contribution(&self) -> Result<u128> {
        minimum_contribution(self.config.minimum_usd, self.price_feed.latest_price())
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// Commitment to the contributions accepted since the last reset.
    ///
    /// Each accepted contribution folds `(sender, value)` into the previous
    /// root with SHA-256. Identical histories give identical roots.
    #[inline]
    pub fn state_root(&self) -> [u8; 32] {
        self.state_root
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    fn next_root(previous: &[u8; 32], sender: &Address, value: u128) -> [u8; 32] {
        let mut data = Vec::with_capacity(32 + 20 + 16);
        data.extend_from_slice(previous);
        data.extend_from_slice(sender.as_bytes());
        data.extend_from_slice(&value.to_le_bytes());
        compute_hash(&data)
    }
}

impl fmt::Debug for FundingLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FundingLedger")
            .field("owner", &self.owner)
            .field("price_feed", &self.price_feed.address())
            .field("config", &self.config)
            .field("funders", &self.funders.len())
            .field("balance", &self.balance)
            .field("state_root", &self.state_root_hex())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
