//! Command handler for `.iplookup` / `.ip`.

use std::path::PathBuf;
use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;

use super::query::resolve_query;
use super::{Reply, UserLookup};
use crate::config::{Settings, COMMAND_NAMES, COMMAND_PREFIX, DOWNLOAD_NOTICE};
use crate::dns::{normalize, HostResolver};
use crate::error_handling::LookupError;
use crate::geoip::{
    build_download_urls, locate_or_fetch, lookup_ip, Bootstrap, DatabaseSource, Edition,
    MaxMindSource,
};

/// Extracts the argument of an `.iplookup` / `.ip` command line.
///
/// Returns `None` if the line is not one of these commands, and `Some(None)`
/// if the command was given without an argument. Command names are matched
/// case-insensitively.
pub fn parse_trigger(line: &str) -> Option<Option<&str>> {
    let rest = line.trim_start().strip_prefix(COMMAND_PREFIX)?;
    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest.trim_end(), ""),
    };

    if !COMMAND_NAMES
        .iter()
        .any(|command| command.eq_ignore_ascii_case(name))
    {
        return None;
    }

    Some(Some(argument).filter(|arg| !arg.is_empty()))
}

/// The IP/host lookup command.
///
/// Holds the shared resources a lookup needs; each call to [`handle`] is an
/// independent invocation that opens the databases afresh.
///
/// [`handle`]: IpLookup::handle
pub struct IpLookup<S = MaxMindSource, R = TokioAsyncResolver> {
    settings: Settings,
    client: reqwest::Client,
    resolver: Arc<R>,
    source: S,
}

impl<S, R> IpLookup<S, R>
where
    S: DatabaseSource,
    R: HostResolver,
{
    /// Creates the command from the host's settings and shared clients.
    pub fn new(settings: Settings, client: reqwest::Client, resolver: Arc<R>, source: S) -> Self {
        Self {
            settings,
            client,
            resolver,
            source,
        }
    }

    /// Runs the command and sends the outcome.
    ///
    /// A successful lookup is sent with [`Reply::say`]; every failure is sent
    /// to the invoking user with [`Reply::reply`].
    pub async fn handle<U, O>(&self, argument: Option<&str>, users: &U, out: &O)
    where
        U: UserLookup + ?Sized,
        O: Reply + ?Sized,
    {
        match self.run(argument, users, out).await {
            Ok(line) => out.say(&line),
            Err(e) => out.reply(&e.to_string()),
        }
    }

    /// Runs the command and returns the reply line.
    ///
    /// Stages run in order and the first failure ends the invocation: query
    /// resolution, database availability, address validation, lookup.
    pub async fn run<U, O>(
        &self,
        argument: Option<&str>,
        users: &U,
        out: &O,
    ) -> Result<String, LookupError>
    where
        U: UserLookup + ?Sized,
        O: Reply + ?Sized,
    {
        let query = resolve_query(argument, users)?;
        let database_dir = self.database_dir(out).await?;
        let ip = normalize(&query, self.resolver.as_ref()).await?;
        log::debug!("Looking up {} (query: {})", ip, query);

        let result = lookup_ip(&self.source, self.resolver.as_ref(), &database_dir, ip).await?;
        Ok(result.to_string())
    }

    async fn database_dir<O>(&self, out: &O) -> Result<PathBuf, LookupError>
    where
        O: Reply + ?Sized,
    {
        let search_paths = self.settings.search_paths();
        let configured = self.settings.configured_db_dir();
        let download_urls =
            build_download_urls(&Edition::DOWNLOAD_ORDER, self.settings.geoip.license_key());
        let bootstrap = Bootstrap {
            search_paths: &search_paths,
            configured: configured.as_deref(),
            download_urls: &download_urls,
            download_dir: &self.settings.homedir,
        };

        locate_or_fetch(&self.client, &bootstrap, || out.say(DOWNLOAD_NOTICE))
            .await
            .map_err(|e| {
                log::error!("Can't find (or download) usable GeoIP database: {:#}", e);
                LookupError::NoDatabase
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SYSTEM_GEOIP_DIR;
    use crate::geoip::{has_database_pair, AsnRecord, CityRecord};
    use crate::test_helpers::{
        FakeDatabaseSource, FakeResolver, FakeUsers, RecordingReply, Sent,
    };
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use std::path::Path;
    use tempfile::TempDir;

    const GOOGLE_DNS: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));
    const DOC_V6: IpAddr = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));

    fn home_with_databases() -> TempDir {
        let home = TempDir::new().expect("Failed to create temp directory");
        for edition in Edition::DOWNLOAD_ORDER {
            std::fs::write(home.path().join(edition.file_name()), b"mmdb").unwrap();
        }
        home
    }

    fn google_source() -> FakeDatabaseSource {
        FakeDatabaseSource::default()
            .with_city(
                GOOGLE_DNS,
                CityRecord {
                    country_name: Some("United States".to_string()),
                    region: None,
                    city: None,
                },
            )
            .with_asn(
                GOOGLE_DNS,
                AsnRecord {
                    number: Some(15169),
                    organization: Some("GOOGLE".to_string()),
                },
            )
    }

    fn resolver() -> FakeResolver {
        FakeResolver::default()
            .with_ptr(GOOGLE_DNS, "dns.google.")
            .with_host("dns.google", &[GOOGLE_DNS, IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4))])
    }

    /// Client whose every request fails to connect.
    fn offline_client() -> reqwest::Client {
        reqwest::Client::builder()
            .proxy(reqwest::Proxy::all("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap()
    }

    fn command(
        homedir: &Path,
        source: FakeDatabaseSource,
    ) -> IpLookup<FakeDatabaseSource, FakeResolver> {
        IpLookup::new(
            Settings::new(homedir),
            offline_client(),
            Arc::new(resolver()),
            source,
        )
    }

    #[test]
    fn test_parse_trigger() {
        assert_eq!(parse_trigger(".ip 8.8.8.8"), Some(Some("8.8.8.8")));
        assert_eq!(parse_trigger(".iplookup   example.com  "), Some(Some("example.com")));
        assert_eq!(parse_trigger(".IP alice"), Some(Some("alice")));
        assert_eq!(parse_trigger(".ip"), Some(None));
        assert_eq!(parse_trigger(".ip   "), Some(None));
        assert_eq!(parse_trigger(".ipv6 ::1"), None);
        assert_eq!(parse_trigger("ip 8.8.8.8"), None);
        assert_eq!(parse_trigger("hello there"), None);
    }

    #[tokio::test]
    async fn test_lookup_google_dns() {
        let home = home_with_databases();
        let command = command(home.path(), google_source());
        let out = RecordingReply::default();

        command
            .handle(Some("8.8.8.8"), &FakeUsers::default(), &out)
            .await;

        assert_eq!(
            out.sent(),
            vec![Sent::Say(
                "Hostname: dns.google | Location: United States | ISP: AS15169 GOOGLE".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_hostname_resolves_to_first_address() {
        let home = home_with_databases();
        let command = command(home.path(), google_source());

        let line = command
            .run(Some("dns.google"), &FakeUsers::default(), &RecordingReply::default())
            .await
            .expect("lookup should succeed");

        assert!(line.starts_with("Hostname: dns.google | "));
        assert!(line.ends_with("ISP: AS15169 GOOGLE"));
    }

    #[tokio::test]
    async fn test_nickname_resolves_to_host() {
        let home = home_with_databases();
        let command = command(home.path(), google_source());
        let users = FakeUsers::default().with_user("alice", Some("8.8.8.8"));

        let line = command
            .run(Some("Alice"), &users, &RecordingReply::default())
            .await
            .expect("lookup should succeed");

        assert!(line.contains("ISP: AS15169 GOOGLE"));
    }

    #[tokio::test]
    async fn test_empty_argument_touches_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let homedir = temp_dir.path().join("home");
        let command = command(&homedir, google_source());
        let out = RecordingReply::default();

        command.handle(Some(""), &FakeUsers::default(), &out).await;

        assert_eq!(out.sent(), vec![Sent::Reply("No search term.".to_string())]);
        assert!(!homedir.exists(), "no download directory should be created");
        assert!(command.source.opened_dirs().is_empty());
        assert_eq!(command.resolver.forward_queries(), 0);
    }

    #[tokio::test]
    async fn test_unknown_nickname() {
        let home = home_with_databases();
        let command = command(home.path(), google_source());
        let out = RecordingReply::default();

        command
            .handle(Some("some_unknown_nick"), &FakeUsers::default(), &out)
            .await;

        assert_eq!(
            out.sent(),
            vec![Sent::Reply("I'm not aware of this user.".to_string())]
        );
        assert!(command.source.opened_dirs().is_empty());
    }

    #[tokio::test]
    async fn test_nickname_without_host() {
        let home = home_with_databases();
        let command = command(home.path(), google_source());
        let users = FakeUsers::default().with_user("bob", None);
        let out = RecordingReply::default();

        command.handle(Some("bob"), &users, &out).await;

        assert_eq!(
            out.sent(),
            vec![Sent::Reply("I don't know that user's host.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_address_not_in_database() {
        let home = home_with_databases();
        let command = command(home.path(), google_source());
        let out = RecordingReply::default();
        let query = DOC_V6.to_string();

        command
            .handle(Some(query.as_str()), &FakeUsers::default(), &out)
            .await;

        assert_eq!(
            out.sent(),
            vec![Sent::Reply("The address is not in the database.".to_string())]
        );
        assert_eq!(command.source.opened_dirs(), vec![home.path().to_path_buf()]);
    }

    #[tokio::test]
    async fn test_unresolvable_queries() {
        let home = home_with_databases();
        let command = command(home.path(), google_source());

        for query in ["2001:db8::zz", "nxdomain.invalid", "1.2.3.4.5:x"] {
            let result = command
                .run(Some(query), &FakeUsers::default(), &RecordingReply::default())
                .await;
            assert_eq!(result, Err(LookupError::Unresolvable), "query: {}", query);
        }
        assert!(command.source.opened_dirs().is_empty());
    }

    #[tokio::test]
    async fn test_configured_directory_is_used() {
        let configured = home_with_databases();
        let home = TempDir::new().expect("Failed to create temp directory");
        let mut settings = Settings::new(home.path());
        settings.geoip.db_path = Some(configured.path().to_path_buf());
        let command = IpLookup::new(
            settings,
            offline_client(),
            Arc::new(resolver()),
            google_source(),
        );

        command
            .run(Some("8.8.8.8"), &FakeUsers::default(), &RecordingReply::default())
            .await
            .expect("lookup should succeed");

        assert_eq!(
            command.source.opened_dirs(),
            vec![configured.path().to_path_buf()]
        );
    }

    #[tokio::test]
    async fn test_download_failure_reports_no_database() {
        if has_database_pair(Path::new(SYSTEM_GEOIP_DIR)) {
            // System databases would satisfy the lookup without a download
            return;
        }
        let home = TempDir::new().expect("Failed to create temp directory");
        let command = command(home.path(), google_source());
        let out = RecordingReply::default();

        command
            .handle(Some("8.8.8.8"), &FakeUsers::default(), &out)
            .await;

        assert_eq!(
            out.sent(),
            vec![
                Sent::Say(DOWNLOAD_NOTICE.to_string()),
                Sent::Reply(
                    "Sorry, I don't have a GeoIP database to use for this lookup.".to_string()
                ),
            ]
        );
        assert!(command.source.opened_dirs().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_database() {
        let home = home_with_databases();
        let command = command(home.path(), FakeDatabaseSource::failing());
        let out = RecordingReply::default();

        command
            .handle(Some("8.8.8.8"), &FakeUsers::default(), &out)
            .await;

        assert_eq!(
            out.sent(),
            vec![Sent::Reply(
                "Sorry, I couldn't read the GeoIP database.".to_string()
            )]
        );
    }
}
