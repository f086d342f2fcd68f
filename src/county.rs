//! County naming: display-name normalization and the Michigan FIPS table.

use once_cell::sync::Lazy;
use regex::Regex;

static COUNTY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+County$").expect("county suffix pattern"));
static SAINT_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bSt\.\s+").expect("saint pattern"));

/// Strips the state and "County" suffixes and spells out "St." as "Saint".
///
/// `"St. Clair County, Michigan"` becomes `"Saint Clair"`.
pub fn clean_county_name(name: &str) -> String {
    let name = name.replace(", Michigan", "");
    let name = name.trim();
    let name = COUNTY_SUFFIX.replace(name, "");
    SAINT_ABBREVIATION.replace_all(&name, "Saint ").into_owned()
}

/// Title-cases a name the way upstream directories expect: a letter is
/// uppercased when it follows a non-letter, lowercased otherwise.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Normalized county key for free-form directory values such as
/// `"ST. CLAIR "`. Returns `None` when nothing usable remains.
pub fn normalize_county_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = clean_county_name(&title_case(trimmed));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Case-insensitive substring filter over cleaned county names.
///
/// The typed text is tried as given and in cleaned form, so upstream
/// spellings such as `"St. Clair"` or `"Wayne County"` match `"Saint Clair"`
/// and `"Wayne"`.
#[derive(Debug, Clone)]
pub struct CountyFilter {
    raw: String,
    cleaned: String,
}

impl CountyFilter {
    pub fn new(text: &str) -> Self {
        let text = text.trim();
        Self {
            raw: text.to_lowercase(),
            cleaned: clean_county_name(&title_case(text)).to_lowercase(),
        }
    }

    pub fn matches(&self, county: &str) -> bool {
        let county = county.to_lowercase();
        county.contains(&self.raw) || county.contains(&self.cleaned)
    }
}

pub fn county_for_fips(fips: &str) -> Option<&'static str> {
    let fips = fips.trim();
    MI_FIPS_TO_COUNTY
        .iter()
        .find(|(code, _)| *code == fips)
        .map(|(_, name)| *name)
}

/// Michigan state+county FIPS codes.
pub static MI_FIPS_TO_COUNTY: &[(&str, &str)] = &[
    ("26001", "Alcona"),
    ("26003", "Alger"),
    ("26005", "Allegan"),
    ("26007", "Alpena"),
    ("26009", "Antrim"),
    ("26011", "Arenac"),
    ("26013", "Baraga"),
    ("26015", "Barry"),
    ("26017", "Bay"),
    ("26019", "Benzie"),
    ("26021", "Berrien"),
    ("26023", "Branch"),
    ("26025", "Calhoun"),
    ("26027", "Cass"),
    ("26029", "Charlevoix"),
    ("26031", "Cheboygan"),
    ("26033", "Chippewa"),
    ("26035", "Clare"),
    ("26037", "Clinton"),
    ("26039", "Crawford"),
    ("26041", "Delta"),
    ("26043", "Dickinson"),
    ("26045", "Eaton"),
    ("26047", "Emmet"),
    ("26049", "Genesee"),
    ("26051", "Gladwin"),
    ("26053", "Gogebic"),
    ("26055", "Grand Traverse"),
    ("26057", "Gratiot"),
    ("26059", "Hillsdale"),
    ("26061", "Houghton"),
    ("26063", "Huron"),
    ("26065", "Ingham"),
    ("26067", "Ionia"),
    ("26069", "Iosco"),
    ("26071", "Iron"),
    ("26073", "Isabella"),
    ("26075", "Jackson"),
    ("26077", "Kalamazoo"),
    ("26079", "Kalkaska"),
    ("26081", "Kent"),
    ("26083", "Keweenaw"),
    ("26085", "Lake"),
    ("26087", "Lapeer"),
    ("26089", "Leelanau"),
    ("26091", "Lenawee"),
    ("26093", "Livingston"),
    ("26095", "Luce"),
    ("26097", "Mackinac"),
    ("26099", "Macomb"),
    ("26101", "Manistee"),
    ("26103", "Marquette"),
    ("26105", "Mason"),
    ("26107", "Mecosta"),
    ("26109", "Menominee"),
    ("26111", "Midland"),
    ("26113", "Missaukee"),
    ("26115", "Monroe"),
    ("26117", "Montcalm"),
    ("26119", "Montmorency"),
    ("26121", "Muskegon"),
    ("26123", "Newaygo"),
    ("26125", "Oakland"),
    ("26127", "Oceana"),
    ("26129", "Ogemaw"),
    ("26131", "Ontonagon"),
    ("26133", "Osceola"),
    ("26135", "Oscoda"),
    ("26137", "Otsego"),
    ("26139", "Ottawa"),
    ("26141", "Presque Isle"),
    ("26143", "Roscommon"),
    ("26145", "Saginaw"),
    ("26147", "Saint Clair"),
    ("26149", "Saint Joseph"),
    ("26151", "Sanilac"),
    ("26153", "Schoolcraft"),
    ("26155", "Shiawassee"),
    ("26157", "Tuscola"),
    ("26159", "Van Buren"),
    ("26161", "Washtenaw"),
    ("26163", "Wayne"),
    ("26165", "Wexford"),
];
