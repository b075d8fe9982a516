use std::fmt::Debug;

use chrono::Utc;
use log::*;

use crate::{
    cart::{cart_subtotal, compute_fees},
    config::CheckoutConfig,
    errors::CheckoutError,
    events::{CheckoutCompleteEvent, EventProducers, FeeTransferFailedEvent, ProgressEvent},
    traits::{NewOrder, OrderLedgerClient, TokenTransferClient},
    types::{CheckoutSession, CheckoutStatus, FeeBreakdown, PaymentResult, ShopGroup, TxId},
};

/// `PaymentOrchestrator` drives the per-seller settlement loop for one checkout session.
///
/// Each shop group is settled with up to two on-chain transfer legs (seller payout, then
/// platform fee) followed by a write to the order ledger. Groups are processed strictly
/// sequentially, never in parallel: the wallet can show the user only one signing prompt at a
/// time, and concurrent prompts would leave the user guessing which seller each one belongs to.
///
/// Failure isolation is per group, not all-or-nothing. A checkout where some groups settle and
/// others fail is a valid terminal outcome; the session always completes with exactly one
/// [`PaymentResult`] per group, in group order.
pub struct PaymentOrchestrator<W, L> {
    wallet: W,
    ledger: L,
    config: CheckoutConfig,
    producers: EventProducers,
}

impl<W, L> Debug for PaymentOrchestrator<W, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentOrchestrator")
    }
}

impl<W, L> PaymentOrchestrator<W, L> {
    pub fn new(wallet: W, ledger: L, config: CheckoutConfig, producers: EventProducers) -> Self {
        Self { wallet, ledger, config, producers }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }
}

impl<W, L> PaymentOrchestrator<W, L>
where
    W: TokenTransferClient,
    L: OrderLedgerClient,
{
    /// Settle every shop group in the session and return it in `Complete` status.
    ///
    /// The session must be in `Payment` status with a non-empty cart, and the wallet must hold
    /// at least the cart subtotal. Those pre-flight checks are the only way this method returns
    /// an error, and they run before any transfer is attempted, so a rejected checkout moves no
    /// funds. Clone the session first if you want to retry after fixing the cause.
    ///
    /// Once the loop starts, nothing propagates out: every per-group failure is converted into a
    /// `Failed` result for that group and the loop carries on. On return,
    /// `results.len() == groups.len()`, the cart has been cleared (even when every group
    /// failed), and the status is `Complete`.
    pub async fn run(&self, mut session: CheckoutSession) -> Result<CheckoutSession, CheckoutError> {
        if session.status != CheckoutStatus::Payment {
            return Err(CheckoutError::InvalidState { expected: CheckoutStatus::Payment, actual: session.status });
        }
        if session.groups.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.check_balance(&session).await?;

        session.status = CheckoutStatus::Processing;
        let groups = session.groups.clone();
        let total = groups.len();
        info!("🛒️ Checkout started. Settling {total} seller group(s) sequentially.");
        for (i, group) in groups.iter().enumerate() {
            let result = self.settle_group(group, &session).await;
            if result.is_succeeded() {
                debug!("🛒️ [{}] settled", group.seller_id);
            } else {
                debug!("🛒️ [{}] not settled: {}", group.seller_id, result.error.as_deref().unwrap_or("unknown reason"));
            }
            session.results.push(result);
            let next = groups.get(i + 1).map(|g| g.seller_name.clone());
            self.publish_progress(i + 1, total, next).await;
        }

        let succeeded = session.results.iter().filter(|r| r.is_succeeded()).count();
        let failed = total - succeeded;
        if succeeded == 0 {
            warn!("🛒️ No seller group settled. The cart is cleared regardless.");
        }
        session.cart.clear();
        session.status = CheckoutStatus::Complete;
        self.call_checkout_complete_hook(succeeded, failed).await;
        info!("🛒️ Checkout complete. {succeeded} group(s) settled, {failed} failed.");
        Ok(session)
    }

    /// Reject the checkout up front if the wallet cannot cover the whole cart.
    async fn check_balance(&self, session: &CheckoutSession) -> Result<(), CheckoutError> {
        let required = cart_subtotal(&session.cart);
        let available = self.wallet.balance().await.map_err(CheckoutError::BalanceUnavailable)?;
        if available < required {
            warn!("🛒️ Checkout blocked. {required} is needed but the wallet only holds {available}.");
            return Err(CheckoutError::InsufficientBalance { required, available });
        }
        Ok(())
    }

    /// Settle one shop group: seller-payout leg, fee leg, then the ledger write.
    ///
    /// Never returns an error; whatever happens is folded into the group's [`PaymentResult`].
    async fn settle_group(&self, group: &ShopGroup, session: &CheckoutSession) -> PaymentResult {
        let fees = compute_fees(group, self.config.fee_basis_points);
        trace!(
            "🛒️ [{}] subtotal {}, seller take {}, fee {} ({})",
            group.seller_id,
            fees.subtotal,
            fees.seller_amount,
            fees.fee_amount,
            fees.fee_basis_points
        );
        let payout_wallet = match &group.seller_wallet {
            Some(address) => address.clone(),
            None => {
                warn!("🛒️ [{}] has no payout wallet. No transfer of any kind is attempted.", group.seller_id);
                return PaymentResult::failed(group, "seller wallet not configured");
            },
        };

        // Leg 1: seller payout. A failure here is fatal for the group; the fee leg and the
        // ledger write are never attempted.
        let seller_tx = match self.wallet.transfer(fees.seller_amount, &payout_wallet).await {
            Ok(txid) => txid,
            Err(e) => {
                warn!("🛒️💸️ [{}] seller payout failed: {e}", group.seller_id);
                return PaymentResult::failed(group, e.to_string());
            },
        };
        debug!("🛒️💸️ [{}] seller payout of {} confirmed in [{seller_tx}]", group.seller_id, fees.seller_amount);

        // Leg 2: platform fee. A failed fee leg never blocks seller settlement or order
        // recording; it is flagged for manual reconciliation instead.
        let fee_tx = self.collect_fee(group, &fees, &seller_tx).await;

        let order = NewOrder {
            seller_id: group.seller_id.clone(),
            items: group.items.clone(),
            seller_tx_id: seller_tx.clone(),
            fee_tx_id: fee_tx.clone(),
            shipping_name: session.shipping.name.clone(),
            shipping_email: session.shipping.email.clone(),
            shipping_address: session.shipping.address.clone(),
            notes: session.shipping.notes.clone(),
        };
        match self.ledger.create_order(order).await {
            Ok(order_id) => {
                debug!("🛒️📦️ [{}] order {order_id} recorded", group.seller_id);
                PaymentResult::succeeded(group, order_id, seller_tx, fee_tx)
            },
            Err(e) => {
                error!(
                    "🛒️📦️ [{}] order creation failed after funds moved in [{seller_tx}]: {e}. The transaction ids \
                     are kept on the result for reconciliation.",
                    group.seller_id
                );
                PaymentResult::failed_after_transfer(group, seller_tx, fee_tx, "failed to create order")
            },
        }
    }

    async fn collect_fee(&self, group: &ShopGroup, fees: &FeeBreakdown, seller_tx: &TxId) -> Option<TxId> {
        if fees.fee_amount.is_zero() {
            return None;
        }
        match self.wallet.transfer(fees.fee_amount, &self.config.treasury).await {
            Ok(txid) => {
                debug!("🛒️💸️ [{}] fee of {} collected in [{txid}]", group.seller_id, fees.fee_amount);
                Some(txid)
            },
            Err(e) => {
                error!(
                    "🛒️💸️ [{}] fee transfer of {} failed after seller payout [{seller_tx}]: {e}. Flagging for \
                     manual reconciliation and continuing.",
                    group.seller_id, fees.fee_amount
                );
                self.call_fee_failure_hook(group, fees, seller_tx, e.to_string()).await;
                None
            },
        }
    }

    async fn publish_progress(&self, completed: usize, total: usize, current: Option<String>) {
        let event = ProgressEvent { completed, total, current };
        for emitter in &self.producers.progress_producer {
            emitter.publish_event(event.clone()).await;
        }
    }

    async fn call_fee_failure_hook(&self, group: &ShopGroup, fees: &FeeBreakdown, seller_tx: &TxId, reason: String) {
        let event = FeeTransferFailedEvent {
            seller_id: group.seller_id.clone(),
            fee_amount: fees.fee_amount,
            seller_tx_id: seller_tx.clone(),
            reason,
            occurred_at: Utc::now(),
        };
        for emitter in &self.producers.fee_failure_producer {
            emitter.publish_event(event.clone()).await;
        }
    }

    async fn call_checkout_complete_hook(&self, succeeded: usize, failed: usize) {
        let event = CheckoutCompleteEvent { succeeded, failed };
        for emitter in &self.producers.checkout_complete_producer {
            emitter.publish_event(event).await;
        }
    }
}
