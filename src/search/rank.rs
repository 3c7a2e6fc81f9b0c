// src/search/rank.rs
use crate::parse::Record;
use std::collections::HashSet;

/// Minimum blended score a fallback match must clear.
const FALLBACK_THRESHOLD: f32 = 0.3;
/// Weight of the shared-character-set ratio in the blended score.
const CHAR_WEIGHT: f32 = 0.7;
/// Weight of the length-similarity term in the blended score.
const LENGTH_WEIGHT: f32 = 0.3;

/// Tiered ranking over one record set.
///
/// Stage 1 keeps records whose title contains the query, ranked by how many
/// distinct query words the title holds. Stage 2 keeps the rest by the
/// fraction of query words found in the description. Stage 3 is a blended
/// character-similarity fallback used only when the first two stages both
/// come up empty. Ties within a stage preserve input order.
#[derive(Debug, Clone)]
pub struct Ranker {
    title_field: String,
    description_field: String,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new("Heading", "Description")
    }
}

impl Ranker {
    pub fn new(title_field: impl Into<String>, description_field: impl Into<String>) -> Self {
        Self {
            title_field: title_field.into(),
            description_field: description_field.into(),
        }
    }

    /// Rank `records` against `query`, best first. Pure: the same inputs
    /// always produce the same ordered sequence.
    pub fn rank<'a>(&self, query: &str, records: &'a [Record]) -> Vec<&'a Record> {
        let query = query.trim().to_lowercase();
        let words: HashSet<&str> = query.split_whitespace().collect();

        let mut title_hits: Vec<(usize, &Record)> = Vec::new();
        let mut rest: Vec<&Record> = Vec::new();

        for record in records {
            let title = record.get(&self.title_field).to_lowercase();
            if title.contains(&query) {
                let score = words.iter().filter(|w| title.contains(*w)).count();
                title_hits.push((score, record));
            } else {
                rest.push(record);
            }
        }
        title_hits.sort_by(|a, b| b.0.cmp(&a.0));

        let mut desc_hits: Vec<(f32, &Record)> = Vec::new();
        if !words.is_empty() {
            for &record in &rest {
                let desc = record.get(&self.description_field).to_lowercase();
                let found = words.iter().filter(|w| desc.contains(*w)).count();
                if found > 0 {
                    desc_hits.push((found as f32 / words.len() as f32, record));
                }
            }
            desc_hits.sort_by(|a, b| b.0.total_cmp(&a.0));
        }

        if title_hits.is_empty() && desc_hits.is_empty() {
            return self.fallback(&query, records);
        }

        title_hits
            .into_iter()
            .map(|(_, r)| r)
            .chain(desc_hits.into_iter().map(|(_, r)| r))
            .collect()
    }

    /// Stage 3: blended character similarity against title+description.
    fn fallback<'a>(&self, query: &str, records: &'a [Record]) -> Vec<&'a Record> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f32, &Record)> = records
            .iter()
            .filter_map(|record| {
                let haystack = format!(
                    "{} {}",
                    record.get(&self.title_field),
                    record.get(&self.description_field)
                )
                .to_lowercase();
                let score = blended_similarity(query, &haystack);
                (score > FALLBACK_THRESHOLD).then_some((score, record))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, r)| r).collect()
    }

    /// Quick title filter for suggestion lists: case-insensitive containment,
    /// deduplicated by title, capped at `limit`.
    pub fn suggest<'a>(
        &self,
        query: &str,
        records: &'a [Record],
        limit: usize,
    ) -> Vec<&'a Record> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        records
            .iter()
            .filter(|r| {
                let title = r.get(&self.title_field);
                title.to_lowercase().contains(&query) && seen.insert(title.to_string())
            })
            .take(limit)
            .collect()
    }
}

fn blended_similarity(query: &str, haystack: &str) -> f32 {
    let query_chars: HashSet<char> = query.chars().filter(|c| !c.is_whitespace()).collect();
    let haystack_chars: HashSet<char> = haystack.chars().filter(|c| !c.is_whitespace()).collect();
    if query_chars.is_empty() {
        return 0.0;
    }

    let shared = query_chars.intersection(&haystack_chars).count();
    let char_ratio = shared as f32 / query_chars.len() as f32;

    let (ql, hl) = (query.len() as f32, haystack.len() as f32);
    let longest = ql.max(hl);
    let length_score = if longest > 0.0 {
        1.0 - (ql - hl).abs() / longest
    } else {
        0.0
    };

    CHAR_WEIGHT * char_ratio + LENGTH_WEIGHT * length_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn dataset() -> Vec<Record> {
        parse(
            "Heading,Description\n\
             Cats,about felines\n\
             Dogs,about canines\n\
             Catalog of cats,all the cats\n",
        )
        .records
    }

    fn titles<'a>(ranked: &[&'a Record]) -> Vec<&'a str> {
        ranked.iter().map(|r| r.get("Heading")).collect()
    }

    #[test]
    fn title_substring_lands_in_stage_one() {
        let records = dataset();
        let ranked = Ranker::default().rank("cat", &records);
        assert!(titles(&ranked).contains(&"Cats"));
        assert!(titles(&ranked).contains(&"Catalog of cats"));
        assert!(!titles(&ranked).contains(&"Dogs"));
    }

    #[test]
    fn description_overlap_catches_what_titles_miss() {
        let records = dataset();
        let ranked = Ranker::default().rank("about", &records);
        // No title contains "about"; both descriptions do, with equal
        // fraction, so input order is preserved.
        assert_eq!(titles(&ranked), vec!["Cats", "Dogs"]);
    }

    #[test]
    fn stage_one_precedes_stage_two_without_resorting() {
        let records = parse(
            "Heading,Description\n\
             plain,mentions rust here\n\
             rust book,nothing relevant\n",
        )
        .records;
        let ranked = Ranker::default().rank("rust", &records);
        // Title hit first even though it appears later in the input.
        assert_eq!(titles(&ranked), vec!["rust book", "plain"]);
    }

    #[test]
    fn stage_one_ranks_by_distinct_words_found() {
        let records = parse(
            "Heading,Description\n\
             red pandas,x\n\
             red and green pandas,x\n",
        )
        .records;
        let ranked = Ranker::default().rank("green pandas", &records);
        assert_eq!(titles(&ranked)[0], "red and green pandas");
    }

    #[test]
    fn fallback_fires_only_when_both_stages_are_empty() {
        let records = dataset();
        // "zzz" shares no characters with any record and the length gap is
        // large, so even the fallback yields nothing.
        assert!(Ranker::default().rank("zzz", &records).is_empty());

        // A scrambled query shares most characters with "Cats about felines".
        let ranked = Ranker::default().rank("sleni taec fobu", &records);
        assert!(!ranked.is_empty());
    }

    #[test]
    fn ranking_is_idempotent() {
        let records = dataset();
        let ranker = Ranker::default();
        let a: Vec<usize> = ranker.rank("cat", &records).iter().map(|r| r.id).collect();
        let b: Vec<usize> = ranker.rank("cat", &records).iter().map(|r| r.id).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_query_returns_everything_in_input_order() {
        let records = dataset();
        let ranked = Ranker::default().rank("", &records);
        assert_eq!(titles(&ranked), vec!["Cats", "Dogs", "Catalog of cats"]);
    }

    #[test]
    fn suggest_dedups_titles_and_caps_results() {
        let records = parse(
            "Heading,Description\n\
             Cats,a\n\
             Cats,b\n\
             Catapults,c\n\
             Cattle,d\n",
        )
        .records;
        let ranker = Ranker::default();
        let suggestions = ranker.suggest("cat", &records, 2);
        assert_eq!(titles(&suggestions), vec!["Cats", "Catapults"]);
        assert!(ranker.suggest("", &records, 5).is_empty());
    }
}
