//! The page shell context.
//!
//! One `Shell` owns everything a page reads on mount: the resolved session and
//! the favorites. It replaces ambient globals with an explicit handle that is
//! cheap to clone and share between handlers.
//!
//! Lifecycle: `mount` starts a new mount generation, reloads favorites and, if a
//! token is stored, resolves the session with the state lock released. The
//! result is applied only if no other mount, unmount, login or logout happened
//! in the meantime, so a slow profile request can never overwrite newer state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::favorites::{FavoritesController, Toggled};
use crate::models::account::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::{PetId, User};
use crate::preferences::PreferenceStore;
use crate::session::{SessionError, SessionResolver};
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("could not persist preferences: {0}")]
    Storage(#[from] StorageError),
}

/// What a page renders from.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ShellView {
    pub user: Option<User>,
    pub favorites: Vec<PetId>,
    /// Set when the last session resolution or login attempt failed.
    pub auth_error: Option<String>,
}

struct ShellState {
    generation: u64,
    user: Option<User>,
    favorites: Option<FavoritesController>,
    auth_error: Option<String>,
}

#[derive(Clone)]
pub struct Shell {
    state: Arc<Mutex<ShellState>>,
    store: PreferenceStore,
    resolver: Arc<SessionResolver>,
}

impl Shell {
    pub fn new(store: PreferenceStore, resolver: Arc<SessionResolver>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ShellState {
                generation: 0,
                user: None,
                favorites: None,
                auth_error: None,
            })),
            store,
            resolver,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ShellState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn favorites<'a>(&self, state: &'a mut ShellState) -> &'a mut FavoritesController {
        state
            .favorites
            .get_or_insert_with(|| FavoritesController::mount(self.store.clone()))
    }

    fn view_of(&self, state: &mut ShellState) -> ShellView {
        ShellView {
            user: state.user.clone(),
            favorites: self.favorites(state).list(),
            auth_error: state.auth_error.clone(),
        }
    }

    /// The on-mount step: reload favorites and resolve the session once.
    pub async fn mount(&self) -> ShellView {
        let (generation, token) = {
            let mut state = self.lock();
            state.generation += 1;
            state.user = None;
            state.auth_error = None;
            state.favorites = Some(FavoritesController::mount(self.store.clone()));
            (state.generation, self.store.read_token())
        };

        let Some(token) = token else {
            info!("No stored token; mounting logged out");
            return self.view();
        };

        let resolved = self.resolver.resolve(&token).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                "Discarding session resolution for mount {} (now at {})",
                generation, state.generation
            );
            // A dead token still goes, unless a newer sign-in already replaced it.
            if resolved.is_err()
                && self.store.read_token().as_deref() == Some(token.as_str())
                && let Err(e) = self.store.clear_token()
            {
                warn!("Failed to clear rejected token: {}", e);
            }
            return self.view_of(&mut state);
        }
        match resolved {
            Ok(user) => {
                state.user = Some(user);
            }
            Err(e) => {
                state.user = None;
                state.auth_error = Some(e.user_message());
                if let Err(e) = self.store.clear_token() {
                    warn!("Failed to clear rejected token: {}", e);
                }
            }
        }
        self.view_of(&mut state)
    }

    /// Invalidates any session resolution still in flight.
    pub fn unmount(&self) {
        let mut state = self.lock();
        state.generation += 1;
        debug!("Unmounted; generation now {}", state.generation);
    }

    pub fn view(&self) -> ShellView {
        let mut state = self.lock();
        self.view_of(&mut state)
    }

    pub fn is_favorite(&self, pet_id: PetId) -> bool {
        let mut state = self.lock();
        self.favorites(&mut state).contains(pet_id)
    }

    pub fn toggle_favorite(&self, pet_id: PetId) -> Toggled {
        let mut state = self.lock();
        self.favorites(&mut state).toggle(pet_id)
    }

    pub fn favorite_ids(&self) -> Vec<PetId> {
        let mut state = self.lock();
        self.favorites(&mut state).list()
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<ShellView, ShellError> {
        let result = self.resolver.login(request).await;
        self.sign_in(result)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<ShellView, ShellError> {
        let result = self.resolver.register(request).await;
        self.sign_in(result)
    }

    fn sign_in(&self, result: Result<AuthResponse, SessionError>) -> Result<ShellView, ShellError> {
        let mut state = self.lock();
        let auth = match result {
            Ok(auth) => auth,
            Err(e) => {
                state.auth_error = Some(e.user_message());
                return Err(e.into());
            }
        };
        self.store.write_token(&auth.token)?;
        state.generation += 1;
        state.user = Some(auth.user);
        state.auth_error = None;
        info!("Signed in; generation now {}", state.generation);
        Ok(self.view_of(&mut state))
    }

    /// Drops the session. In-memory state is cleared even if the token cannot be removed.
    pub fn logout(&self) -> Result<ShellView, ShellError> {
        let mut state = self.lock();
        state.generation += 1;
        state.user = None;
        state.auth_error = None;
        self.store.clear_token()?;
        info!("Logged out");
        Ok(self.view_of(&mut state))
    }
}
