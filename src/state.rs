use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::flows::payment::PaymentFlow;
use crate::flows::recovery::OtpRecoveryFlow;
use crate::services::{NotificationDispatcher, SubscriberLedger};

// One mutex per flow instance: transitions on the same session serialize,
// distinct sessions never contend.
type SessionMap<T> = Arc<Mutex<HashMap<Uuid, Arc<Mutex<T>>>>>;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn SubscriberLedger>,
    pub notifier: Option<Arc<dyn NotificationDispatcher>>,
    recoveries: SessionMap<OtpRecoveryFlow>,
    payments: SessionMap<PaymentFlow>,
}

impl AppState {
    pub fn new(ledger: Arc<dyn SubscriberLedger>) -> Self {
        AppState {
            ledger,
            notifier: None,
            recoveries: Arc::new(Mutex::new(HashMap::new())),
            payments: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Reuse the identified recovery session, or open a fresh one.
    pub async fn recovery_session(
        &self,
        session_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> (Uuid, Arc<Mutex<OtpRecoveryFlow>>) {
        let mut sessions = self.recoveries.lock().await;

        if let Some(id) = session_id {
            if let Some(flow) = sessions.get(&id) {
                return (id, flow.clone());
            }
        }

        let id = Uuid::new_v4();
        let flow = Arc::new(Mutex::new(OtpRecoveryFlow::new(
            self.ledger.clone(),
            self.notifier.clone(),
            now,
        )));
        sessions.insert(id, flow.clone());
        (id, flow)
    }

    pub async fn recovery(&self, session_id: Uuid) -> Option<Arc<Mutex<OtpRecoveryFlow>>> {
        self.recoveries.lock().await.get(&session_id).cloned()
    }

    pub async fn insert_payment(&self, flow: PaymentFlow) -> (Uuid, Arc<Mutex<PaymentFlow>>) {
        let id = Uuid::new_v4();
        let flow = Arc::new(Mutex::new(flow));
        self.payments.lock().await.insert(id, flow.clone());
        (id, flow)
    }

    pub async fn payment(&self, session_id: Uuid) -> Option<Arc<Mutex<PaymentFlow>>> {
        self.payments.lock().await.get(&session_id).cloned()
    }

    /// Abandoned flows hold nothing that needs teardown; dropping the entry
    /// is the whole cleanup.
    pub async fn remove_recovery(&self, session_id: Uuid) {
        self.recoveries.lock().await.remove(&session_id);
    }

    pub async fn remove_payment(&self, session_id: Uuid) {
        self.payments.lock().await.remove(&session_id);
    }
}
