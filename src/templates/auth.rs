use askama::Template;
use uuid::Uuid;

use crate::flash::Flash;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "verify_otp.html")]
pub struct VerifyOtpPage {
    pub flashes: Vec<Flash>,
    pub user_id: Uuid,
}
