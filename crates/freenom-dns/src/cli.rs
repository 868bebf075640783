//! Command line definition

use clap::{Args, Parser, Subcommand, ValueEnum};
use freenom_dns_core::record::{DnsRecord, RecordType};
use freenom_dns_core::validation::validate_record_type;

/// Manage DNS records of Freenom domains
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Registrar account name (falls back to FREENOM_USERNAME)
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Registrar account password (falls back to FREENOM_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Registrar implementation
    #[arg(long, value_enum, default_value = "file", global = true)]
    pub registrar: RegistrarKind,

    /// Zone snapshot used by the file registrar
    #[arg(
        long,
        default_value = "freenom-zones.json",
        env = "FREENOM_REGISTRAR_PATH",
        global = true
    )]
    pub registrar_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "FREENOM_LOG_LEVEL", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegistrarKind {
    /// Scratch account, discarded on exit
    Memory,
    /// Account persisted to a JSON snapshot
    File,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a record
    Create(RecordArgs),
    /// Show the current state of a record by id (<name>/<domain>)
    Read(IdArgs),
    /// Change a record in place
    Update(UpdateArgs),
    /// Delete a record by id
    Delete(IdArgs),
    /// Adopt an existing record by id
    Import(IdArgs),
    /// Look up a single record by name
    Get(GetArgs),
    /// List every record of a domain
    List(DomainArgs),
    /// List records of a domain that point at a value
    Reverse(ReverseArgs),
    /// Show what applying a record would do
    Plan(RecordArgs),
}

#[derive(Args)]
pub struct IdArgs {
    /// Record identifier (<name>/<domain>)
    pub id: String,
}

#[derive(Args)]
pub struct DomainArgs {
    /// Domain name
    #[arg(long)]
    pub domain: String,
}

#[derive(Args)]
pub struct GetArgs {
    /// Domain name
    #[arg(long)]
    pub domain: String,

    /// Record name (subdomain)
    #[arg(long)]
    pub name: String,
}

#[derive(Args)]
pub struct ReverseArgs {
    /// Domain name
    #[arg(long)]
    pub domain: String,

    /// Record value to match exactly (e.g. an IP address)
    #[arg(long)]
    pub value: String,
}

#[derive(Args)]
pub struct RecordArgs {
    /// Domain name
    #[arg(long)]
    pub domain: String,

    /// Record type (A, AAAA, CNAME, LOC, MX, NAPTR, RP, TXT)
    #[arg(long = "type", value_parser = parse_record_type)]
    pub record_type: RecordType,

    /// Record name (subdomain, empty for the apex)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Record value
    #[arg(long)]
    pub value: String,

    /// Priority, used by MX
    #[arg(long, default_value_t = 0)]
    pub priority: i64,

    /// Time to live in seconds
    #[arg(long, default_value_t = 3600)]
    pub ttl: i64,
}

impl RecordArgs {
    pub fn to_record(&self) -> DnsRecord {
        DnsRecord {
            domain: self.domain.clone(),
            record_type: self.record_type,
            name: self.name.clone(),
            value: self.value.clone(),
            priority: self.priority,
            ttl: self.ttl,
        }
    }
}

/// Attributes to change; anything omitted keeps its current value
#[derive(Args)]
pub struct UpdateArgs {
    /// Record identifier (<name>/<domain>)
    pub id: String,

    #[arg(long = "type", value_parser = parse_record_type)]
    pub record_type: Option<RecordType>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub value: Option<String>,

    #[arg(long)]
    pub priority: Option<i64>,

    #[arg(long)]
    pub ttl: Option<i64>,
}

impl UpdateArgs {
    /// Apply the requested changes on top of the current record
    pub fn apply(&self, current: &DnsRecord) -> DnsRecord {
        let mut plan = current.clone();
        if let Some(record_type) = self.record_type {
            plan.record_type = record_type;
        }
        if let Some(name) = &self.name {
            plan.name = name.clone();
        }
        if let Some(value) = &self.value {
            plan.value = value.clone();
        }
        if let Some(priority) = self.priority {
            plan.priority = priority;
        }
        if let Some(ttl) = self.ttl {
            plan.ttl = ttl;
        }
        plan
    }
}

fn parse_record_type(value: &str) -> Result<RecordType, String> {
    validate_record_type(value).map_err(|e| e.to_string())
}
