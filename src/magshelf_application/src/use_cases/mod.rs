pub mod add_comment;
pub mod content_error;
pub mod delete_magazine;
pub mod forgot_password;
pub mod google_login;
pub mod list_magazines;
pub mod list_user_magazines;
pub mod login;
pub mod register;
pub mod reset_password;
pub mod store_upload;
pub mod toggle_like;
pub mod update_magazine;
pub mod upload_magazine;
pub mod verify_otp;

mod populate;

// Re-export for convenience
pub use add_comment::AddCommentUseCase;
pub use content_error::ContentError;
pub use delete_magazine::DeleteMagazineUseCase;
pub use forgot_password::{ForgotPasswordError, ForgotPasswordUseCase};
pub use google_login::{GoogleLoginError, GoogleLoginUseCase};
pub use list_magazines::ListMagazinesUseCase;
pub use list_user_magazines::ListUserMagazinesUseCase;
pub use login::{LoginError, LoginUseCase};
pub use register::{RegisterError, RegisterOutcome, RegisterUseCase};
pub use reset_password::{ResetPasswordError, ResetPasswordUseCase};
pub use store_upload::{StoreUploadError, StoreUploadUseCase};
pub use toggle_like::ToggleLikeUseCase;
pub use update_magazine::UpdateMagazineUseCase;
pub use upload_magazine::UploadMagazineUseCase;
pub use verify_otp::{VerifyOtpError, VerifyOtpUseCase};
