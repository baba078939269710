use clap::Parser;

#[derive(Clone, Debug, Parser)]
pub struct AppArgs {
    /// Database connection string
    #[clap(long, env = "PROGRESS_DATABASE_URL", default_value = "sqlite:data.db")]
    pub database_url: String,

    /// Port
    #[clap(long, env = "PROGRESS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SMTP relay hostname; when unset, outgoing mail is logged instead
    #[clap(long, env = "PROGRESS_SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP username
    #[clap(long, env = "PROGRESS_SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[clap(long, env = "PROGRESS_SMTP_PASSWORD")]
    pub smtp_password: Option<String>,

    /// Sender address for OTP mail
    #[clap(
        long,
        env = "PROGRESS_MAIL_FROM",
        default_value = "School Progress <noreply@school.example>"
    )]
    pub mail_from: String,

    /// Insert the default subjects and exams before serving
    #[clap(long)]
    pub seed: bool,
}
