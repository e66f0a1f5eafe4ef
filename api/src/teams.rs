//! Static NBA reference table: full name <-> upstream code <-> logo asset.
//!
//! Built once per process. Lookups never fail: unknown codes resolve to
//! themselves and unknown names resolve to [`DEFAULT_LOGO_ID`], so a team the
//! table doesn't know about can still be displayed.
use std::collections::HashMap;
use std::sync::LazyLock;

/// Logo asset used for any name missing from the table.
pub const DEFAULT_LOGO_ID: &str = "default-logo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamIdentity {
    pub full_name: &'static str, // "Los Angeles Lakers"
    pub code: &'static str,      // "LAL"
    pub logo_id: &'static str,   // "lakers"
}

const fn team(full_name: &'static str, code: &'static str, logo_id: &'static str) -> TeamIdentity {
    TeamIdentity { full_name, code, logo_id }
}

/// All 30 franchises, alphabetical by full name (the picker order).
static TEAMS: [TeamIdentity; 30] = [
    team("Atlanta Hawks", "ATL", "hawks"),
    team("Boston Celtics", "BOS", "celtics"),
    team("Brooklyn Nets", "BKN", "nets"),
    team("Charlotte Hornets", "CHA", "hornets"),
    team("Chicago Bulls", "CHI", "bulls"),
    team("Cleveland Cavaliers", "CLE", "cavs"),
    team("Dallas Mavericks", "DAL", "mavs"),
    team("Denver Nuggets", "DEN", "nuggets"),
    team("Detroit Pistons", "DET", "pistons"),
    team("Golden State Warriors", "GSW", "warriors"),
    team("Houston Rockets", "HOU", "rockets"),
    team("Indiana Pacers", "IND", "pacers"),
    team("LA Clippers", "LAC", "clippers"),
    team("Los Angeles Lakers", "LAL", "lakers"),
    team("Memphis Grizzlies", "MEM", "grizzlies"),
    team("Miami Heat", "MIA", "heat"),
    team("Milwaukee Bucks", "MIL", "bucks"),
    team("Minnesota Timberwolves", "MIN", "wolves"),
    team("New Orleans Pelicans", "NOP", "pelicans"),
    team("New York Knicks", "NYK", "knicks"),
    team("Oklahoma City Thunder", "OKC", "thunder"),
    team("Orlando Magic", "ORL", "magic"),
    team("Philadelphia 76ers", "PHI", "sixers"),
    team("Phoenix Suns", "PHX", "suns"),
    team("Portland Trail Blazers", "POR", "blazers"),
    team("Sacramento Kings", "SAC", "kings"),
    team("San Antonio Spurs", "SAS", "spurs"),
    team("Toronto Raptors", "TOR", "raptors"),
    team("Utah Jazz", "UTA", "jazz"),
    team("Washington Wizards", "WAS", "wizards"),
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static TeamIdentity>> =
    LazyLock::new(|| TEAMS.iter().map(|t| (t.full_name, t)).collect());

static BY_CODE: LazyLock<HashMap<&'static str, &'static TeamIdentity>> =
    LazyLock::new(|| TEAMS.iter().map(|t| (t.code, t)).collect());

pub fn all_teams() -> &'static [TeamIdentity] {
    &TEAMS
}

/// Exact match on the canonical full name.
pub fn find_by_name(full_name: &str) -> Option<&'static TeamIdentity> {
    BY_NAME.get(full_name).copied()
}

/// Case-insensitive match on the upstream code.
pub fn find_by_code(code: &str) -> Option<&'static TeamIdentity> {
    if let Some(&team) = BY_CODE.get(code) {
        return Some(team);
    }
    BY_CODE.get(code.to_ascii_uppercase().as_str()).copied()
}

pub fn name_to_code(full_name: &str) -> Option<&'static str> {
    find_by_name(full_name).map(|t| t.code)
}

/// Full name for `code`, or `code` itself when the table has no entry.
pub fn code_to_name(code: &str) -> &str {
    find_by_code(code).map(|t| t.full_name).unwrap_or(code)
}

pub fn name_to_logo_id(full_name: &str) -> &'static str {
    find_by_name(full_name)
        .map(|t| t.logo_id)
        .unwrap_or(DEFAULT_LOGO_ID)
}

/// Resolve free-form user input (full name or code) to a table entry.
pub fn lookup(input: &str) -> Option<&'static TeamIdentity> {
    let input = input.trim();
    find_by_name(input).or_else(|| find_by_code(input)).or_else(|| {
        TEAMS
            .iter()
            .find(|t| t.full_name.eq_ignore_ascii_case(input))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_thirty_unique_teams() {
        let names: HashSet<_> = all_teams().iter().map(|t| t.full_name).collect();
        let codes: HashSet<_> = all_teams().iter().map(|t| t.code).collect();
        let logos: HashSet<_> = all_teams().iter().map(|t| t.logo_id).collect();
        assert_eq!(all_teams().len(), 30);
        assert_eq!(names.len(), 30);
        assert_eq!(codes.len(), 30);
        assert_eq!(logos.len(), 30);
    }

    #[test]
    fn table_is_sorted_for_the_picker() {
        let names: Vec<_> = all_teams().iter().map(|t| t.full_name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn name_and_code_are_mutual_inverses() {
        for t in all_teams() {
            let code = name_to_code(t.full_name).expect("every name has a code");
            assert_eq!(code_to_name(code), t.full_name);
            assert_eq!(name_to_code(code_to_name(t.code)), Some(t.code));
        }
    }

    #[test]
    fn logo_lookup_is_total() {
        for t in all_teams() {
            assert_ne!(name_to_logo_id(t.full_name), DEFAULT_LOGO_ID);
        }
        assert_eq!(name_to_logo_id("Seattle SuperSonics"), DEFAULT_LOGO_ID);
        assert_eq!(name_to_logo_id(""), DEFAULT_LOGO_ID);
    }

    #[test]
    fn unknown_code_falls_back_to_itself() {
        assert_eq!(code_to_name("SEA"), "SEA");
        assert_eq!(code_to_name(""), "");
        assert_eq!(name_to_code("Seattle SuperSonics"), None);
    }

    #[test]
    fn code_lookup_ignores_case() {
        assert_eq!(code_to_name("lal"), "Los Angeles Lakers");
        assert_eq!(find_by_code("gsw").map(|t| t.logo_id), Some("warriors"));
    }

    #[test]
    fn name_lookup_is_exact() {
        assert_eq!(name_to_code("miami heat"), None);
        assert_eq!(name_to_code("Miami Heat"), Some("MIA"));
    }

    #[test]
    fn lookup_accepts_names_codes_and_loose_case() {
        assert_eq!(lookup("Boston Celtics").map(|t| t.code), Some("BOS"));
        assert_eq!(lookup(" bos ").map(|t| t.code), Some("BOS"));
        assert_eq!(lookup("boston celtics").map(|t| t.code), Some("BOS"));
        assert!(lookup("Seattle SuperSonics").is_none());
    }
}
