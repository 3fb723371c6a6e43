//! Intake service orchestrating sessions, the form machine, and collaborators.
//!
//! Generic over the repository, generator, and store ports to keep the
//! dependency direction clean (`kontrakt-core` never depends on
//! `kontrakt-infra`). Collaborator failures are never fatal: generation and
//! store errors leave the session reviewing so finish can be retried, and a
//! failed summary-row insert never blocks delivery of an already-generated
//! document.

use tracing::{info, warn};
use uuid::Uuid;

use kontrakt_types::config::AppConfig;
use kontrakt_types::contract::NewContract;
use kontrakt_types::event::SessionEvent;
use kontrakt_types::reply::{CompletedContract, Reply};
use kontrakt_types::session::IntakeSession;

use crate::form::{self, FinalizedForm, StepOutcome, prompts};
use crate::generator::DocumentGenerator;
use crate::registry::SessionRegistry;
use crate::repository::ContractRepository;
use crate::store::DocumentStore;

/// Orchestrates the intake dialog for all conversations.
pub struct IntakeService<R, G, S>
where
    R: ContractRepository,
    G: DocumentGenerator,
    S: DocumentStore,
{
    registry: SessionRegistry,
    repo: R,
    generator: G,
    store: S,
    config: AppConfig,
}

impl<R, G, S> IntakeService<R, G, S>
where
    R: ContractRepository,
    G: DocumentGenerator,
    S: DocumentStore,
{
    pub fn new(repo: R, generator: G, store: S, config: AppConfig) -> Self {
        Self {
            registry: SessionRegistry::new(),
            repo,
            generator,
            store,
            config,
        }
    }

    /// Access the session registry (eviction task, introspection).
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Access the contract repository (history listing, downloads).
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Access the document store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process one event for a conversation and produce the reply.
    ///
    /// The per-session lock is held for the whole call, so events for one
    /// conversation are applied strictly in arrival order and a duplicate
    /// finish queues behind the outstanding one instead of racing it.
    pub async fn handle_event(&self, conversation_id: &str, event: SessionEvent) -> Reply {
        let handle = if matches!(event, SessionEvent::Start) {
            self.registry.obtain(conversation_id)
        } else {
            match self.registry.get(conversation_id) {
                Some(handle) => handle,
                None => {
                    return Reply::Rejected {
                        message: prompts::no_session_message(),
                        prompt: None,
                    };
                }
            }
        };

        let mut session = handle.lock().await;
        session.touch();

        match form::apply(&mut session, &event, &self.config.form) {
            Ok(StepOutcome::Prompt(prompt)) => Reply::Prompt { prompt },
            Ok(StepOutcome::Finalize(finalized)) => {
                let reply = self.finalize(&session, finalized).await;
                if matches!(reply, Reply::Completed { .. }) {
                    drop(session);
                    self.registry.remove(conversation_id);
                }
                reply
            }
            Err(err) => Reply::Rejected {
                message: prompts::validation_message(&err),
                prompt: Some(prompts::prompt_for(&session)),
            },
        }
    }

    /// Generate, store, and persist a validated form.
    async fn finalize(&self, session: &IntakeSession, finalized: FinalizedForm) -> Reply {
        info!(
            conversation_id = %session.conversation_id,
            items = finalized.payload.items.len(),
            "Submitting contract for generation"
        );

        let bytes = match self.generator.generate(&finalized.payload).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(
                    conversation_id = %session.conversation_id,
                    error = %err,
                    "Document generation failed"
                );
                return Reply::Failed {
                    message: prompts::generation_failed(&err),
                    prompt: prompts::prompt_for(session),
                };
            }
        };

        let filename = format!("contract-{}.pdf", Uuid::now_v7());
        let file_ref = match self.store.store(&filename, &bytes).await {
            Ok(file_ref) => file_ref,
            Err(err) => {
                warn!(
                    conversation_id = %session.conversation_id,
                    error = %err,
                    "Document store write failed"
                );
                return Reply::Failed {
                    message: prompts::store_failed(&err),
                    prompt: prompts::prompt_for(session),
                };
            }
        };

        let contract = NewContract {
            buyer_name: finalized.payload.buyer_name.clone(),
            inn: finalized.payload.buyer_inn.clone(),
            phone: finalized.payload.buyer_phone.clone(),
            total_sum: finalized.total_sum,
            file_ref: file_ref.clone(),
        };

        // Persistence failure never blocks delivery of the generated document.
        let record_id = match self.repo.save(&contract).await {
            Ok(record) => Some(record.id),
            Err(err) => {
                warn!(
                    conversation_id = %session.conversation_id,
                    error = %err,
                    "Summary row insert failed; delivering document anyway"
                );
                None
            }
        };

        info!(
            conversation_id = %session.conversation_id,
            total_sum = contract.total_sum,
            persisted = record_id.is_some(),
            "Contract generated"
        );

        Reply::Completed {
            contract: CompletedContract {
                filename,
                file_ref,
                total_sum: finalized.total_sum,
                record_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::Utc;

    use kontrakt_types::contract::{ContractPayload, ContractRecord};
    use kontrakt_types::error::{GeneratorError, RepositoryError, StoreError};
    use kontrakt_types::event::Command;
    use kontrakt_types::session::FormState;

    #[derive(Default)]
    struct MockRepo {
        saved: StdMutex<Vec<NewContract>>,
        fail: AtomicBool,
    }

    impl ContractRepository for MockRepo {
        async fn save(&self, contract: &NewContract) -> Result<ContractRecord, RepositoryError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(RepositoryError::Connection);
            }
            let mut saved = self.saved.lock().unwrap();
            saved.push(contract.clone());
            Ok(ContractRecord {
                id: saved.len() as i64,
                buyer_name: contract.buyer_name.clone(),
                inn: contract.inn.clone(),
                phone: contract.phone.clone(),
                total_sum: contract.total_sum,
                file_ref: contract.file_ref.clone(),
                created_at: Utc::now(),
            })
        }

        async fn get(&self, _id: i64) -> Result<Option<ContractRecord>, RepositoryError> {
            Ok(None)
        }

        async fn list_recent(&self, _limit: i64) -> Result<Vec<ContractRecord>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Ok(self.saved.lock().unwrap().len() as u64)
        }
    }

    #[derive(Default)]
    struct MockGenerator {
        fail: AtomicBool,
        calls: AtomicBool,
    }

    impl DocumentGenerator for MockGenerator {
        async fn generate(&self, _payload: &ContractPayload) -> Result<Vec<u8>, GeneratorError> {
            self.calls.store(true, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(GeneratorError::Status {
                    status: 502,
                    detail: "bad gateway".to_string(),
                });
            }
            Ok(b"%PDF-1.4 stub".to_vec())
        }
    }

    #[derive(Default)]
    struct MockStore;

    impl DocumentStore for MockStore {
        async fn store(&self, filename: &str, _bytes: &[u8]) -> Result<String, StoreError> {
            Ok(format!("documents/{filename}"))
        }

        async fn load(&self, file_ref: &str) -> Result<Vec<u8>, StoreError> {
            Err(StoreError::NotFound(file_ref.to_string()))
        }
    }

    type TestService = IntakeService<MockRepo, MockGenerator, MockStore>;

    fn service() -> TestService {
        IntakeService::new(
            MockRepo::default(),
            MockGenerator::default(),
            MockStore,
            AppConfig::default(),
        )
    }

    async fn send_text(service: &TestService, text: &str) -> Reply {
        service
            .handle_event(
                "chat-1",
                SessionEvent::Text {
                    text: text.to_string(),
                },
            )
            .await
    }

    async fn send_command(service: &TestService, command: Command) -> Reply {
        service
            .handle_event("chat-1", SessionEvent::Command { command })
            .await
    }

    /// Drives "chat-1" to the review menu with one item on the list.
    async fn drive_to_review(service: &TestService) {
        service.handle_event("chat-1", SessionEvent::Start).await;
        for value in [
            "ООО Биной",
            "301234567",
            "-",
            "+998901234567",
            "-",
            "-",
            "-",
            "Каримов А.А.",
        ] {
            send_text(service, value).await;
        }
        send_text(service, "Цемент М400").await;
        send_text(service, "2").await;
        send_text(service, "150000").await;
    }

    #[tokio::test]
    async fn test_event_without_session_is_rejected() {
        let service = service();
        let reply = send_text(&service, "привет").await;
        assert!(matches!(reply, Reply::Rejected { prompt: None, .. }));
    }

    #[tokio::test]
    async fn test_finalize_persists_and_clears_session() {
        let service = service();
        drive_to_review(&service).await;

        let reply = send_command(&service, Command::Finish).await;
        let Reply::Completed { contract } = reply else {
            panic!("expected completed reply");
        };
        assert!((contract.total_sum - 336_000.0).abs() < 1e-6);
        assert_eq!(contract.record_id, Some(1));
        assert!(contract.file_ref.ends_with(".pdf"));

        let saved = service.repo().saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].buyer_name, "ООО Биной");
        assert_eq!(saved[0].inn, "301234567");
        drop(saved);

        // Completion is terminal and clearing
        assert!(service.registry().get("chat-1").is_none());
    }

    #[tokio::test]
    async fn test_generation_failure_keeps_session_for_retry() {
        let service = service();
        drive_to_review(&service).await;
        service.generator.fail.store(true, Ordering::SeqCst);

        let reply = send_command(&service, Command::Finish).await;
        assert!(matches!(reply, Reply::Failed { .. }));
        assert!(service.repo().saved.lock().unwrap().is_empty());

        let handle = service.registry().get("chat-1").expect("session kept");
        assert_eq!(handle.lock().await.state, FormState::ReviewingItems);

        // Retry succeeds without re-entering any data
        service.generator.fail.store(false, Ordering::SeqCst);
        let reply = send_command(&service, Command::Finish).await;
        assert!(matches!(reply, Reply::Completed { .. }));
    }

    #[tokio::test]
    async fn test_persistence_failure_still_delivers_document() {
        let service = service();
        drive_to_review(&service).await;
        service.repo().fail.store(true, Ordering::SeqCst);

        let reply = send_command(&service, Command::Finish).await;
        let Reply::Completed { contract } = reply else {
            panic!("expected completed reply");
        };
        assert_eq!(contract.record_id, None);
        assert!(service.registry().get("chat-1").is_none());
    }

    #[tokio::test]
    async fn test_finish_after_completion_is_rejected() {
        let service = service();
        drive_to_review(&service).await;
        send_command(&service, Command::Finish).await;

        let reply = send_command(&service, Command::Finish).await;
        assert!(matches!(reply, Reply::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_validation_error_reply_carries_reprompt() {
        let service = service();
        service.handle_event("chat-1", SessionEvent::Start).await;
        for _ in 0..8 {
            send_command(&service, Command::Skip).await;
        }
        send_text(&service, "Цемент").await;

        let reply = send_text(&service, "много").await;
        let Reply::Rejected { message, prompt } = reply else {
            panic!("expected rejected reply");
        };
        assert_eq!(message, "❗ Введите число");
        assert!(prompt.unwrap().text.contains("Цемент"));
    }
}
