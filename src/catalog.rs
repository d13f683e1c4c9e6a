//! Static content shared by every session: choice lists for the generation
//! forms and the attack-type vocabulary used for suggestions.

pub const GRC_CATEGORIES: &[&str] = &[
    "Regulation",
    "Risk Management",
    "Compliance",
    "Audit",
    "Governance",
    "Management",
    "Policy",
    "Ethics",
    "Threat Assessment",
    "Leadership",
    "Business Continuity",
    "Random",
];

pub const DIFFICULTIES: &[&str] = &["Easy", "Medium", "Hard"];

pub const INDUSTRIES: &[&str] = &[
    "Finance",
    "Healthcare",
    "Retail",
    "Technology",
    "Energy",
    "Education",
    "Supply Chain",
    "Telecommunications",
    "Pharmaceutical",
    "Transportation",
    "Cybersecurity Company",
    "Manufacturing",
    "CYBERPUNK2077",
];

pub const SKILL_LEVELS: &[&str] = &["Script Kiddie", "Intermediate", "Advanced", "APT"];

pub const THREAT_INTENSITY_MIN: i64 = 1;
pub const THREAT_INTENSITY_MAX: i64 = 100;

pub const ATTACK_TYPES: &[&str] = &[
    "Adware",
    "Advanced Persistent Threat",
    "ARP Spoofing",
    "Botnet",
    "Brute Force Attack",
    "Buffer Overflow",
    "Business Email Compromise",
    "Clickjacking",
    "Command Injection",
    "Credential Stuffing",
    "Cross-Site Request Forgery",
    "Cross-Site Scripting",
    "Cryptojacking",
    "DNS Spoofing",
    "DNS Tunneling",
    "Denial of Service",
    "Directory Traversal",
    "Distributed Denial of Service",
    "Drive-by Download",
    "Eavesdropping",
    "Evil Twin",
    "Fileless Malware",
    "Insider Threat",
    "Keylogger",
    "LDAP Injection",
    "Logic Bomb",
    "Malvertising",
    "Man-in-the-Middle",
    "Pass the Hash",
    "Password Spraying",
    "Pharming",
    "Phishing",
    "Privilege Escalation",
    "Ransomware",
    "Remote Code Execution",
    "Rootkit",
    "Session Hijacking",
    "Smishing",
    "Social Engineering",
    "Spear Phishing",
    "Spyware",
    "SQL Injection",
    "Supply Chain Attack",
    "Trojan",
    "Typosquatting",
    "Vishing",
    "Watering Hole Attack",
    "Whaling",
    "Worm",
    "XML External Entity",
    "Zero-Day Exploit",
];
