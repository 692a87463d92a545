//! The shipped challenge catalog.
//!
//! Declaration order is significant: it is the order `challenges` lists
//! entries in and the tie-break order of the solution matcher.

use std::sync::LazyLock;

use regex::Regex;

use ctf_types::{AcceptRule, Challenge, Difficulty};

/// `' or 1=1`, `' or 'a'='a'`, quoted on either side.
static SQL_TAUTOLOGY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'\s*or\s+'?(\w+)'?\s*=\s*'?(\w+)'?").expect("tautology pattern is valid")
});

/// `' or true`, `admin' --`, `admin'#`, `x' /*`
static SQL_BYPASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'\s*(?:or\s+true\b|--|#|/\*)").expect("bypass pattern is valid")
});

/// A shell separator or substitution followed by reading the flag file.
static SHELL_INJECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:;|&&|\|\|?|\$\(|`)\s*cat\s+/etc/flag\b").expect("injection pattern is valid")
});

fn sql_injection_payload(line: &str) -> bool {
    if SQL_BYPASS.is_match(line) {
        return true;
    }
    SQL_TAUTOLOGY
        .captures_iter(line)
        .any(|caps| caps.get(1).map(|m| m.as_str()) == caps.get(2).map(|m| m.as_str()))
}

fn command_injection_payload(line: &str) -> bool {
    SHELL_INJECTION.is_match(line)
}

/// `challenge accepted` / `challenge-accepted`
fn caesar_plaintext_variant(line: &str) -> bool {
    line.replace([' ', '-'], "_") == "challenge_accepted"
}

/// `security first` / `security_first` / `security-first`
fn base64_plaintext_variant(line: &str) -> bool {
    line.replace([' ', '_', '-'], "") == "securityfirst"
}

pub const CHALLENGES: &[Challenge] = &[
    Challenge {
        id: "hidden_message",
        title: "Hidden Message",
        category: "Web",
        difficulty: Difficulty::Easy,
        description: "Find the hidden message in the page source",
        hint: "Look for HTML comments in the page source. Try `curl /index.html`.",
        accepts: &[AcceptRule::SubstringMatch("FLAG{welcome_to_my_portfolio}")],
        reward: "Real Name: Alex Chen",
        steps: &[
            "Fetch the landing page: curl /index.html",
            "Read the HTML comment near the top of the document.",
            "Submit the flag exactly as it appears: FLAG{welcome_to_my_portfolio}",
        ],
    },
    Challenge {
        id: "caesar_cipher",
        title: "Caesar Cipher",
        category: "Crypto",
        difficulty: Difficulty::Easy,
        description: "Decode: FKDOOHQJH_DFFHSWHG",
        hint: "Try shifting letters by 3 positions",
        accepts: &[
            AcceptRule::ExactMatch("CHALLENGE_ACCEPTED"),
            AcceptRule::CustomPredicate {
                label: "plaintext with spaces or dashes",
                check: caesar_plaintext_variant,
                samples: &["challenge accepted", "challenge-accepted"],
            },
        ],
        reward: "Age: 22 years old",
        steps: &[
            "Every letter was shifted forward by three places (A -> D).",
            "Shift each letter back by three: F -> C, K -> H, D -> A, O -> L.",
            "The underscore is not a letter and stays where it is.",
            "Submit the plaintext: CHALLENGE_ACCEPTED",
        ],
    },
    Challenge {
        id: "robots_txt",
        title: "Robots Exclusion",
        category: "Recon",
        difficulty: Difficulty::Easy,
        description: "Crawlers are asked to stay away from one page. Visit it anyway.",
        hint: "Well-behaved crawlers read /robots.txt before anything else.",
        accepts: &[AcceptRule::SubstringMatch(
            "FLAG{robots_are_not_access_control}",
        )],
        reward: "Location: Boston, MA",
        steps: &[
            "Read the crawler rules: curl /robots.txt",
            "Note the Disallow entry: /admin-portal",
            "Fetch it: curl /admin-portal",
            "Submit the flag printed by the portal.",
        ],
    },
    Challenge {
        id: "binary_message",
        title: "Binary Message",
        category: "Encoding",
        difficulty: Difficulty::Medium,
        description: "Decode: 01001000 01100101 01101100 01101100 01101111",
        hint: "Convert binary to ASCII",
        accepts: &[AcceptRule::ExactMatch("Hello")],
        reward: "University: MIT - Computer Science",
        steps: &[
            "Each group of eight bits is one ASCII character.",
            "01001000 = 72 = 'H', 01100101 = 101 = 'e', 01101100 = 108 = 'l' ...",
            "The decode command understands binary octets too.",
            "Submit the decoded word: Hello",
        ],
    },
    Challenge {
        id: "reverse_engineering",
        title: "Reverse Engineering",
        category: "Encoding",
        difficulty: Difficulty::Medium,
        description: "Decode: U2VjdXJpdHlGaXJzdA==",
        hint: "This looks like Base64 encoding",
        accepts: &[
            AcceptRule::ExactMatch("SecurityFirst"),
            AcceptRule::CustomPredicate {
                label: "plaintext with separators",
                check: base64_plaintext_variant,
                samples: &["security first", "security_first", "security-first"],
            },
        ],
        reward: "Specialization: Penetration Testing",
        steps: &[
            "The trailing '==' is Base64 padding.",
            "Decode it: decode U2VjdXJpdHlGaXJzdA==",
            "Submit the decoded text: SecurityFirst",
        ],
    },
    Challenge {
        id: "sql_injection",
        title: "SQL Injection",
        category: "Web",
        difficulty: Difficulty::Hard,
        description: "Find the flag in this query: SELECT * FROM users WHERE id = '?'",
        hint: "Try a UNION SELECT statement, or make the WHERE clause always true",
        accepts: &[
            AcceptRule::SubstringMatch("UNION SELECT flag FROM secrets"),
            AcceptRule::CustomPredicate {
                label: "tautology or comment bypass",
                check: sql_injection_payload,
                samples: &["' or 1=1 --", "' or '1'='1", "admin' --", "x' or true"],
            },
        ],
        reward: "Contact: alex.chen@cybersec.edu",
        steps: &[
            "The id is pasted into the query between quotes.",
            "Close the quote, then either append a UNION or force the condition.",
            "UNION route: 1' UNION SELECT flag FROM secrets --",
            "Tautology route: ' OR 1=1 --",
        ],
    },
    Challenge {
        id: "command_injection",
        title: "Command Injection",
        category: "Web",
        difficulty: Difficulty::Hard,
        description: "The status page runs `ping -c 1 <host>` on whatever you type. Make it print /etc/flag.",
        hint: "The shell happily runs a second command after ; && | or inside $( )",
        accepts: &[AcceptRule::CustomPredicate {
            label: "shell separator or substitution",
            check: command_injection_payload,
            samples: &[
                "127.0.0.1; cat /etc/flag",
                "127.0.0.1 && cat /etc/flag",
                "127.0.0.1 | cat /etc/flag",
                "127.0.0.1 || cat /etc/flag",
                "$(cat /etc/flag)",
                "`cat /etc/flag`",
            ],
        }],
        reward: "GitHub: github.com/alexchen-sec",
        steps: &[
            "Your input lands after `ping -c 1` unquoted.",
            "Give ping a host, then chain another command with a separator.",
            "Submit: 127.0.0.1; cat /etc/flag",
        ],
    },
    Challenge {
        id: "privilege_escalation",
        title: "Privilege Escalation",
        category: "Forensics",
        difficulty: Difficulty::Hard,
        description: "vault.txt belongs to the database admins. Read it and submit the flag inside.",
        hint: "Admins live in the users table. Own the database first (sql_injection).",
        accepts: &[AcceptRule::SubstringMatch("FLAG{root_of_all_evil}")],
        reward: "Status: Open to security internships",
        steps: &[
            "Solve sql_injection to dump the admin credentials.",
            "Read the vault: cat vault.txt",
            "Submit the flag stored in the vault.",
        ],
    },
];
