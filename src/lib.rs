//! # Magshelf - Magazine Sharing Backend
//!
//! Facade crate that re-exports the public APIs of the magshelf components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `Magazine`, etc.
//! - **Ports**: `AccountStore`, `MagazineStore`, `SessionStore`, `EmailClient`, etc.
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `ToggleLikeUseCase`, etc.
//! - **Adapters**: `PostgresMagazineStore`, `RedisSessionStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `MagazineService`, the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use magshelf_core::*;
}

pub use magshelf_core::{
    Account, AccountId, AccountProfile, Comment, Email, Magazine, MagazineFilter, MagazineId,
    MagazinePatch, MagazineView, NewMagazine, OneTimeCode, Password, Session, SessionId,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository and service trait definitions
pub mod ports {
    pub use magshelf_core::ports::*;
}

pub use magshelf_core::{
    AccountStore, EmailClient, FileStorage, IdentityProvider, MagazineStore, PasswordHasher,
    SessionStore,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use magshelf_application::*;
}

pub use magshelf_application::{
    AddCommentUseCase, DeleteMagazineUseCase, ForgotPasswordUseCase, GoogleLoginUseCase,
    ListMagazinesUseCase, ListUserMagazinesUseCase, LoginUseCase, RegisterUseCase,
    ResetPasswordUseCase, StoreUploadUseCase, ToggleLikeUseCase, UpdateMagazineUseCase,
    UploadMagazineUseCase, VerifyOtpUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use magshelf_adapters::{
        auth, config, email, hashing, http, oauth, persistence, storage,
    };
}

pub use magshelf_adapters::{
    AppState, Settings,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        HashMapAccountStore, HashMapMagazineStore, HashMapSessionStore, PostgresAccountStore,
        PostgresMagazineStore, RedisSessionStore,
    },
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use magshelf_service::{
    MagazineService,
    helpers::{configure_postgresql, configure_redis},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
