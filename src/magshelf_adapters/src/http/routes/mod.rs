pub mod current_user;
pub mod error;
pub mod forgot_password;
pub mod google;
pub mod login;
pub mod logout;
pub mod magazines;
pub mod register;
pub mod reset_password;
pub mod upload;
pub mod verify_otp;

pub use current_user::current_user;
pub use error::{ApiError, ErrorResponse};
pub use forgot_password::{ForgotPasswordRequest, forgot_password};
pub use google::{GoogleCallbackQuery, google_callback, google_login};
pub use login::{LoginRequest, LoginResponse, login};
pub use logout::{LogoutResponse, logout};
pub use magazines::{
    CommentRequest, ListMagazinesQuery, UpdateMagazineRequest, UploadMagazineRequest,
    add_comment, delete_magazine, list_magazines, toggle_like, update_magazine, upload_magazine,
    user_magazines,
};
pub use register::{RegisterRequest, RegisterResponse, register};
pub use reset_password::{ResetPasswordRequest, reset_password};
pub use upload::{UploadResponse, upload_file};
pub use verify_otp::{MessageResponse, VerifyOtpRequest, verify_otp};
