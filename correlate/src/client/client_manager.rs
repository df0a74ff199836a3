use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use tracing::{debug, warn};

use crate::client::client::Client;
use crate::client::client_manager_config::ClientManagerConfig;
use crate::correlation::correlation_id::{CorrelationId, CorrelationIdGenerator};
use crate::correlation::sequential_correlation_id_generator::SequentialCorrelationIdGenerator;
use crate::error::ClientError;
use crate::handler::handler::HandlerMode;
use crate::handler::response_handler::{ExceptionHandlerType, ResultHandlerType, UpdatesHandlerType};
use crate::native::native_source::{EventBatchListener, NativeClientId, NativeSource};
use crate::native::payload::Payload;

/// Creates clients on a native source and routes every delivered batch to its client.
///
/// All clients of one manager draw their correlation ids from the same generator.
pub struct ClientManager {
    native_source: Arc<dyn NativeSource>,
    correlation_id_generator: Arc<dyn CorrelationIdGenerator>,
    clients: RwLock<HashMap<NativeClientId, Arc<Client>>>,
    config: ClientManagerConfig,
}

impl ClientManager {
    pub fn new(native_source: Arc<dyn NativeSource>, config: ClientManagerConfig) -> Self {
        let correlation_id_generator = Arc::new(
            SequentialCorrelationIdGenerator::starting_at(config.get_first_correlation_id())
        );
        return Self::new_with_generator(native_source, correlation_id_generator, config);
    }

    pub fn new_with_generator(native_source: Arc<dyn NativeSource>,
                              correlation_id_generator: Arc<dyn CorrelationIdGenerator>,
                              config: ClientManagerConfig) -> Self {
        return ClientManager {
            native_source,
            correlation_id_generator,
            clients: RwLock::new(HashMap::with_capacity(config.get_clients_capacity())),
            config,
        };
    }

    /// Creating the native client and registering it happen under the write lock,
    /// so no batch can be routed before the client is known and no two clients
    /// are created at once.
    pub fn create_client(&self,
                         mode: HandlerMode,
                         default_exception_handler: Option<ExceptionHandlerType>) -> Result<Arc<Client>, ClientError> {
        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);

        let client_id = self.native_source.create()?;
        if clients.contains_key(&client_id) {
            return Err(ClientError::DuplicateClientId(client_id));
        }

        let client = Arc::new(Client::new(
            client_id,
            self.native_source.clone(),
            self.correlation_id_generator.clone(),
            mode,
            default_exception_handler,
            self.config.get_pending_requests_capacity(),
        ));
        clients.insert(client_id, client.clone());

        debug!(client_id, total_clients = clients.len(), "client registered");
        return Ok(client);
    }

    pub fn create_client_with_update_handler(&self,
                                             update_handler: ResultHandlerType,
                                             update_exception_handler: Option<ExceptionHandlerType>,
                                             default_exception_handler: Option<ExceptionHandlerType>) -> Result<Arc<Client>, ClientError> {
        return self.create_client(HandlerMode::single(update_handler, update_exception_handler), default_exception_handler);
    }

    pub fn create_client_with_updates_handler(&self,
                                              updates_handler: UpdatesHandlerType,
                                              updates_exception_handler: Option<ExceptionHandlerType>,
                                              default_exception_handler: Option<ExceptionHandlerType>) -> Result<Arc<Client>, ClientError> {
        return self.create_client(HandlerMode::multi(updates_handler, updates_exception_handler), default_exception_handler);
    }

    pub fn get_client(&self, client_id: NativeClientId) -> Option<Arc<Client>> {
        return self.clients.read().unwrap_or_else(PoisonError::into_inner).get(&client_id).cloned();
    }

    pub fn client_count(&self) -> usize {
        return self.clients.read().unwrap_or_else(PoisonError::into_inner).len();
    }

    pub fn next_correlation_id(&self) -> CorrelationId {
        return self.correlation_id_generator.generate();
    }

    /// The handle a native source delivers batches through.
    pub fn as_listener(self: &Arc<Self>) -> Weak<dyn EventBatchListener> {
        let listener: Arc<dyn EventBatchListener> = self.clone();
        return Arc::downgrade(&listener);
    }
}

impl EventBatchListener for ClientManager {
    fn on_event_batch(&self,
                      client_id: NativeClientId,
                      is_closed: bool,
                      correlation_ids: Vec<CorrelationId>,
                      payloads: Vec<Payload>) {
        let Some(client) = self.get_client(client_id) else {
            warn!(client_id, events = correlation_ids.len(), "event batch for an unknown client, dropped");
            return;
        };
        client.handle_events(is_closed, correlation_ids, payloads);
    }
}
