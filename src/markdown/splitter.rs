//! Title extraction and leading noise removal for README text.

/// Hosts whose images are treated as badges.
const BADGE_HOSTS: &[&str] = &["shields.io"];

/// README split into optional title and remaining Markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReadme {
    pub title: Option<String>,
    pub body: String,
}

/// Heading accepted as title.
enum TitleHeading<'a> {
    Primary(&'a str),
    Secondary(&'a str),
}

impl<'a> TitleHeading<'a> {
    /// Classifies a trimmed line as level one or level two heading.
    fn classify(line: &'a str) -> Option<Self> {
        if let Some(rest) = line.strip_prefix("# ") {
            return Some(Self::Primary(rest));
        }
        if let Some(rest) = line.strip_prefix("## ") {
            return Some(Self::Secondary(rest));
        }
        None
    }

    fn text(&self) -> &'a str {
        match self {
            Self::Primary(text) | Self::Secondary(text) => text.trim(),
        }
    }
}

/// Returns true for lines skipped before title detection.
///
/// Noise lines are blank, start with an image (`!`), a linked image
/// (`[![`) or an admonition-like marker (`[!`), or mention a badge host
/// or the word "badge" in any case.
pub fn is_noise_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }
    if line.starts_with('!') || line.starts_with("[![") || line.starts_with("[!") {
        return true;
    }
    let lower = line.to_lowercase();
    BADGE_HOSTS.iter().any(|host| lower.contains(host)) || lower.contains("badge")
}

/// Splits README text into title and body.
///
/// Skips the leading run of noise lines, then scans forward for the first
/// level one or level two heading. A level one heading ends the scan at
/// once; a level two heading is accepted only when no level one heading
/// precedes it. Lines between the noise prefix and the accepted heading
/// are dropped together with the heading. Blank lines after the title are
/// skipped and the rest, trimmed, is the body.
///
/// # Arguments
///
/// * `readme`: Raw README text
///
/// # Returns
///
/// Title (None when no heading exists) and body text
pub fn split_title(readme: &str) -> SplitReadme {
    let lines: Vec<&str> = readme.lines().map(str::trim_end).collect();

    let mut index = lines
        .iter()
        .position(|line| !is_noise_line(line))
        .unwrap_or(lines.len());

    let heading = lines[index..]
        .iter()
        .enumerate()
        .find_map(|(offset, &line)| {
            TitleHeading::classify(line.trim()).map(|heading| (index + offset, heading))
        });

    let title = heading.map(|(position, heading)| {
        index = position + 1;
        heading.text().to_string()
    });

    while index < lines.len() && lines[index].trim().is_empty() {
        index += 1;
    }

    SplitReadme {
        title,
        body: lines[index..].join("\n").trim().to_string(),
    }
}
