//! The simulated box the visitor pokes at with `curl`, `cat` and `ls`.
//!
//! Nothing here touches the network or the real filesystem. Every response is
//! a canned table entry; some entries carry a secret label that the router
//! records the first time the entry is served.

use crate::error::CommandError;
use crate::session::Session;

/// Secret labels, in the order a typical walkthrough finds them.
pub mod secret {
    pub const DECODING: &str = "Decoder: base64 and binary are encodings, not encryption";
    pub const SOURCE_COMMENT: &str = "Page source: HTML comments ship to every visitor";
    pub const ROBOTS: &str = "Recon: robots.txt lists what the owner wants hidden";
    pub const ADMIN_PORTAL: &str = "Admin portal: reachable by anyone who asks";
    pub const SHELL_HISTORY: &str = "Shell history: .bash_history remembers everything";
    pub const VAULT: &str = "Vault: admin-only files opened with stolen credentials";
}

/// Number of secrets `status` counts towards.
pub const SECRET_TARGET: usize = 6;

#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub lines: &'static [&'static str],
    pub secret: Option<&'static str>,
}

struct Page {
    paths: &'static [&'static str],
    resource: Resource,
}

const PAGES: &[Page] = &[
    Page {
        paths: &["/", "/index.html"],
        resource: Resource {
            lines: &[
                "<!DOCTYPE html>",
                "<html>",
                "<head><title>Alex Chen | Security Portfolio</title></head>",
                "<!-- remove before launch: FLAG{welcome_to_my_portfolio} -->",
                "<body>",
                "  <h1>Alex Chen</h1>",
                "  <p>Breaking things to learn how to fix them.</p>",
                "</body>",
                "</html>",
            ],
            secret: Some(secret::SOURCE_COMMENT),
        },
    },
    Page {
        paths: &["/robots.txt"],
        resource: Resource {
            lines: &["User-agent: *", "Disallow: /admin-portal"],
            secret: Some(secret::ROBOTS),
        },
    },
    Page {
        paths: &["/admin-portal", "/admin-portal/"],
        resource: Resource {
            lines: &[
                "== Admin Portal ==",
                "Welcome back, administrator.",
                "FLAG{robots_are_not_access_control}",
            ],
            secret: Some(secret::ADMIN_PORTAL),
        },
    },
    Page {
        paths: &["/api/ping"],
        resource: Resource {
            lines: &[
                "{\"status\": \"ok\", \"usage\": \"/api/ping?host=<host>\"}",
                "The status page runs: ping -c 1 <host>",
            ],
            secret: None,
        },
    },
];

struct FileEntry {
    name: &'static str,
    mode: &'static str,
    owner: &'static str,
    /// Challenge that must be solved before the file can be read.
    requires: Option<(&'static str, &'static str)>,
    resource: Resource,
}

const FILES: &[FileEntry] = &[
    FileEntry {
        name: "readme.txt",
        mode: "-rw-r--r--",
        owner: "alex",
        requires: None,
        resource: Resource {
            lines: &[
                "Welcome to my practice box.",
                "Everything here is simulated. Nothing you type leaves this terminal.",
                "Start with: challenges",
            ],
            secret: None,
        },
    },
    FileEntry {
        name: "notes.txt",
        mode: "-rw-r--r--",
        owner: "alex",
        requires: None,
        resource: Resource {
            lines: &[
                "- the status page still pipes the host straight into ping",
                "- user lookup builds its SQL by string concatenation",
                "- move vault.txt somewhere only db admins can reach",
            ],
            secret: None,
        },
    },
    FileEntry {
        name: ".bash_history",
        mode: "-rw-------",
        owner: "alex",
        requires: None,
        resource: Resource {
            lines: &[
                "curl /robots.txt",
                "mysql -u admin -p users",
                "chmod 400 vault.txt",
                "echo U2VjdXJpdHlGaXJzdA== | base64 -d",
            ],
            secret: Some(secret::SHELL_HISTORY),
        },
    },
    FileEntry {
        name: "vault.txt",
        mode: "-r--------",
        owner: "root",
        requires: Some((
            "sql_injection",
            "Only database admins can read the vault. Own the database first (solve sql_injection).",
        )),
        resource: Resource {
            lines: &[
                "== vault ==",
                "db_admin: correct-horse-battery-staple",
                "FLAG{root_of_all_evil}",
            ],
            secret: Some(secret::VAULT),
        },
    },
];

/// Canned response for `curl <path>`, or `None` for a 404.
#[must_use]
pub fn fetch(path: &str) -> Option<&'static Resource> {
    let path = path.trim().to_lowercase();
    let path = path
        .strip_prefix("http://localhost")
        .or_else(|| path.strip_prefix("localhost"))
        .unwrap_or(&path);
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    PAGES
        .iter()
        .find(|page| page.paths.contains(&path.as_str()))
        .map(|page| &page.resource)
}

/// Lines for a path `fetch` does not know.
#[must_use]
pub fn not_found(path: &str) -> Vec<String> {
    vec![
        "<html><body><h1>404 Not Found</h1></body></html>".to_string(),
        format!("curl: (22) The requested URL returned error: 404 ({path})"),
    ]
}

/// Contents of `cat <name>`.
pub fn read_file(name: &str, session: &Session) -> Result<&'static Resource, CommandError> {
    let trimmed = name.trim();
    let key = trimmed.to_lowercase();
    let key = key
        .strip_prefix("./")
        .or_else(|| key.strip_prefix("~/"))
        .unwrap_or(&key);

    let Some(entry) = FILES.iter().find(|entry| entry.name == key) else {
        return Err(CommandError::NoSuchFile(trimmed.to_string()));
    };

    if let Some((challenge_id, hint)) = entry.requires
        && !session.is_solved(challenge_id)
    {
        return Err(CommandError::PermissionDenied {
            file: entry.name.to_string(),
            hint,
        });
    }

    Ok(&entry.resource)
}

/// `ls -l` style listing of the simulated home directory.
#[must_use]
pub fn listing() -> Vec<String> {
    FILES
        .iter()
        .map(|entry| format!("{} {:<5} {}", entry.mode, entry.owner, entry.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CHALLENGES;

    #[test]
    fn fetch_normalizes_paths() {
        for path in ["/index.html", "INDEX.HTML", "http://localhost/", "  /  "] {
            let page = fetch(path).unwrap_or_else(|| panic!("{path}"));
            assert_eq!(page.secret, Some(secret::SOURCE_COMMENT));
        }
        assert!(fetch("/etc/passwd").is_none());
    }

    #[test]
    fn landing_page_hides_a_flag() {
        let page = fetch("/").unwrap();
        assert!(
            page.lines
                .iter()
                .any(|line| line.contains("FLAG{welcome_to_my_portfolio}"))
        );
    }

    #[test]
    fn robots_points_at_the_portal() {
        let robots = fetch("/robots.txt").unwrap();
        assert!(robots.lines.contains(&"Disallow: /admin-portal"));
        assert!(fetch("/admin-portal").is_some());
    }

    #[test]
    fn cat_strips_home_prefixes() {
        let session = Session::default();
        assert!(read_file("./readme.txt", &session).is_ok());
        assert!(read_file("~/NOTES.txt", &session).is_ok());
        assert_eq!(
            read_file("secret.db", &session).unwrap_err(),
            CommandError::NoSuchFile("secret.db".to_string())
        );
    }

    #[test]
    fn vault_is_gated_on_sql_injection() {
        let mut session = Session::default();
        let err = read_file("vault.txt", &session).unwrap_err();
        assert!(matches!(
            err,
            CommandError::PermissionDenied { ref file, .. } if file == "vault.txt"
        ));

        let sql = CHALLENGES
            .iter()
            .find(|c| c.id == "sql_injection")
            .unwrap();
        session.record_solve(sql);
        let vault = read_file("vault.txt", &session).unwrap();
        assert!(vault.lines.contains(&"FLAG{root_of_all_evil}"));
        assert_eq!(vault.secret, Some(secret::VAULT));
    }

    #[test]
    fn listing_names_every_file() {
        let lines = listing();
        assert_eq!(lines.len(), FILES.len());
        assert!(lines.iter().any(|line| line.ends_with(" vault.txt")));
    }

    #[test]
    fn secret_target_matches_distinct_labels() {
        let mut labels: Vec<&str> = PAGES
            .iter()
            .map(|page| page.resource)
            .chain(FILES.iter().map(|file| file.resource))
            .filter_map(|resource| resource.secret)
            .collect();
        labels.push(secret::DECODING);
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SECRET_TARGET);
    }
}
