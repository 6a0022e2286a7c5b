pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountError, AccountParts, AccountProfile, DisplayName},
    code_grant::{CODE_TTL_MINUTES, CodeGrant},
    email::Email,
    ids::{AccountId, CommentId, IdError, MagazineId},
    magazine::{
        Comment, CommentText, CommentView, Magazine, MagazineError, MagazineFilter,
        MagazinePatch, MagazineView, NewMagazine, PersonView, UploaderView,
    },
    one_time_code::{OneTimeCode, OneTimeCodeError},
    password::{Password, PasswordHash},
    session::{Session, SessionId},
    upload::{ALLOWED_CONTENT_TYPES, FileUpload, UploadError},
};

pub use ports::{
    repositories::{
        AccountStore, AccountStoreError, MagazineStore, MagazineStoreError, SessionStore,
        SessionStoreError,
    },
    services::{
        EmailClient, FileStorage, FileStorageError, IdentityProvider, IdentityProviderError,
        PasswordHasher, PasswordHasherError, ProviderProfile,
    },
};

pub use strategies::auth_validator::AuthValidator;
