mod auth;
mod google;
mod helpers;
mod magazines;
mod upload;
