use clap::Parser;
use std::path::PathBuf;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "httplog")]
#[command(about = "Key-addressed HTTP response store with an anonymized request log")]
pub struct Args {
    // Address to bind
    #[arg(long, env = "HTTPLOG_HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, env = "HTTPLOG_PORT", default_value_t = 3000)]
    pub port: u16,

    // SQLite database file
    #[arg(short, long, env = "HTTPLOG_DATABASE", default_value = "httplog.db")]
    pub database: PathBuf,

    // Max request body size in bytes for create (default: unlimited)
    #[arg(long, env = "HTTPLOG_BODY_LIMIT")]
    pub body_limit: Option<usize>,
}

impl Args {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["httplog"]);
        assert_eq!(args.port, 3000);
        assert_eq!(args.database, PathBuf::from("httplog.db"));
        assert_eq!(args.body_limit, None);
        assert_eq!(args.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "httplog",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--database",
            "/tmp/x.db",
            "--body-limit",
            "1024",
        ]);
        assert_eq!(args.bind_addr(), "127.0.0.1:8080");
        assert_eq!(args.database, PathBuf::from("/tmp/x.db"));
        assert_eq!(args.body_limit, Some(1024));
    }
}
