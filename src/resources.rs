//! Curated study links with search, category filter, A-Z sort and a random pick.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub name: &'static str,
    pub url: &'static str,
}

const fn r(name: &'static str, url: &'static str) -> Resource {
    Resource { name, url }
}

pub static RESOURCES: &[(&str, &[Resource])] = &[
    (
        "reddit",
        &[
            r("r/CompTIA", "https://www.reddit.com/r/CompTIA/"),
            r("r/CyberSecurity", "https://www.reddit.com/r/cybersecurity/"),
            r("r/AskNetsec", "https://www.reddit.com/r/AskNetsec/"),
            r("r/Casp", "https://www.reddit.com/r/casp/"),
            r("r/ITCareerQuestions", "https://www.reddit.com/r/ITCareerQuestions/"),
            r("r/sysadmin", "https://www.reddit.com/r/sysadmin/"),
        ],
    ),
    (
        "youtube",
        &[
            r("Professor Messer", "https://www.youtube.com/@professormesser"),
            r("NetworkChuck", "https://www.youtube.com/@NetworkChuck"),
            r("PowerCertAnimatedVideos", "https://www.youtube.com/@PowerCertAnimatedVideos"),
            r("HackerSploit", "https://www.youtube.com/@HackerSploit"),
            r("Cyberkraft", "https://www.youtube.com/@cyberkraft"),
        ],
    ),
    (
        "frameworks",
        &[
            r("NIST Cybersecurity Framework", "https://www.nist.gov/cyberframework"),
            r("ISO/IEC 27001", "https://www.iso.org/isoiec-27001-information-security.html"),
            r("MITRE ATT&CK Framework", "https://attack.mitre.org/"),
            r("OWASP Top 10", "https://owasp.org/www-project-top-ten/"),
            r("COBIT", "https://www.isaca.org/resources/cobit"),
            r("CIS Controls", "https://www.cisecurity.org/controls"),
            r("GDPR (General Data Protection Regulation)", "https://gdpr.eu/"),
            r("NIST 800-53 Security Controls", "https://csrc.nist.gov/publications/detail/sp/800-53/rev-5/final"),
            r("ISO 22301 (Business Continuity)", "https://www.iso.org/iso-22301-business-continuity.html"),
        ],
    ),
    (
        "other",
        &[
            r("Official CompTIA Resources", "https://www.comptia.org/resources"),
            r("Cybrary", "https://www.cybrary.it"),
            r("OWASP Official Site", "https://owasp.org"),
            r("Pluralsight", "https://www.pluralsight.com/"),
        ],
    ),
];

pub fn categories() -> impl Iterator<Item = &'static str> {
    RESOURCES.iter().map(|(name, _)| *name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceBrowser {
    category: Option<&'static str>,
    search: String,
    sorted: bool,
}

impl ResourceBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<&'static str> {
        self.category
    }

    /// `None` shows every category. Unknown names are ignored.
    pub fn select_category(&mut self, category: Option<&str>) -> bool {
        match category {
            None => {
                self.category = None;
                true
            }
            Some(name) => match categories().find(|c| *c == name) {
                Some(found) => {
                    self.category = Some(found);
                    true
                }
                None => false,
            },
        }
    }

    pub fn search(&mut self, term: &str) {
        self.search = term.trim().to_lowercase();
    }

    pub fn toggle_sort(&mut self) -> bool {
        self.sorted = !self.sorted;
        self.sorted
    }

    fn in_category(&self) -> impl Iterator<Item = &'static Resource> + '_ {
        RESOURCES
            .iter()
            .filter(move |(name, _)| self.category.map_or(true, |c| c == *name))
            .flat_map(|(_, items)| items.iter())
    }

    pub fn listing(&self) -> Vec<&'static Resource> {
        let mut out: Vec<_> = self
            .in_category()
            .filter(|r| r.name.to_lowercase().contains(&self.search))
            .collect();
        if self.sorted {
            out.sort_by_key(|r| r.name.to_lowercase());
        }
        out
    }

    /// Random pick from the selected category; the search term does not apply.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static Resource> {
        let pool: Vec<_> = self.in_category().collect();
        pool.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn search_is_case_insensitive_across_categories() {
        let mut b = ResourceBrowser::new();
        b.search("OWASP");
        let names: Vec<_> = b.listing().iter().map(|r| r.name).collect();
        assert_eq!(names, ["OWASP Top 10", "OWASP Official Site"]);
    }

    #[test]
    fn category_filter_and_sort() {
        let mut b = ResourceBrowser::new();
        assert!(b.select_category(Some("youtube")));
        assert!(!b.select_category(Some("tiktok")));
        assert_eq!(b.category(), Some("youtube"));

        assert!(b.toggle_sort());
        let names: Vec<_> = b.listing().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["Cyberkraft", "HackerSploit", "NetworkChuck", "PowerCertAnimatedVideos", "Professor Messer"]
        );
    }

    #[test]
    fn random_pick_stays_in_category() {
        let mut b = ResourceBrowser::new();
        b.select_category(Some("reddit"));
        b.search("nothing matches this");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let pick = b.random(&mut rng).unwrap();
            assert!(pick.name.starts_with("r/"));
        }
    }
}
