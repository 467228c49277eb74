//! Signing identity shared by every strategy

use praetor_crypto::{KeyPair, VerifyingKey};
use praetor_kernel::{Kernel, KernelError};
use praetor_types::IntentPayload;

/// An agent id plus its derived keypair. Strategies compose this and use
/// it to sign every intent they submit.
pub struct AgentIdentity {
    agent_id: String,
    keypair: KeyPair,
}

impl AgentIdentity {
    pub fn new(agent_id: impl Into<String>) -> Self {
        let agent_id = agent_id.into();
        let keypair = KeyPair::derive(&agent_id);
        Self { agent_id, keypair }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn public_key(&self) -> VerifyingKey {
        *self.keypair.verifying_key()
    }

    /// Sign the canonical encoding and hand the intent to the pipeline.
    pub fn submit(&self, kernel: &mut Kernel, intent: &IntentPayload) -> Result<bool, KernelError> {
        tracing::trace!(agent_id = %self.agent_id, action = %intent.action, "submitting intent");
        let signature = self.keypair.sign(&intent.canonical_bytes());
        kernel.process_intent(&self.agent_id, intent, &signature)
    }
}
