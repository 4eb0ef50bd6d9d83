//! Corpus assembly: pairing identifier chains with recovered post text.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::corpus::{
    DehydratedCorpus, DialogueStats, RehydratedCorpus, Turn, FORMAT, NOTICE, SOURCE,
    TURN_REPRESENTATION,
};
use crate::post::Post;
use crate::speaker::SpeakerMap;
use crate::text::clean_text;

/// Assembles a rehydrated corpus from the scraped posts of a thread.
///
/// For every dialogue in `input`, each chain entry is resolved against
/// `posts`. A turn becomes `null` when the entry was not a valid post
/// number, the number was not found in the crawl, or the post text is
/// empty after normalization; everything else becomes a
/// `[speaker_letter, text]` pair. One [`SpeakerMap`] spans the whole
/// thread, so the same author keeps the same letter across dialogues.
pub fn assemble(
    input: &DehydratedCorpus,
    posts: &BTreeMap<i64, Post>,
    rehydrated_at: NaiveDate,
) -> RehydratedCorpus {
    let mut speakers = SpeakerMap::new();
    let mut dialogues = BTreeMap::new();
    let mut missing = BTreeMap::new();

    for (dialogue_id, chain) in &input.dialogues {
        let mut turns: Vec<Option<Turn>> = Vec::with_capacity(chain.len());
        let mut n_missing = 0usize;

        for entry in chain {
            let Some(post) = entry.as_ref().and_then(|number| posts.get(number)) else {
                n_missing += 1;
                turns.push(None);
                continue;
            };

            let text = clean_text(&post.text);
            if text.is_empty() {
                n_missing += 1;
                turns.push(None);
                continue;
            }

            let speaker = speakers.assign(&post.author);
            turns.push(Some(Turn(speaker, text)));
        }

        missing.insert(
            dialogue_id.clone(),
            DialogueStats {
                n_turns: chain.len(),
                n_missing,
            },
        );
        dialogues.insert(dialogue_id.clone(), turns);
    }

    RehydratedCorpus {
        format: FORMAT.to_string(),
        source: SOURCE.to_string(),
        thread_id: input.thread_id.clone(),
        thread_url: input.thread_url.clone(),
        snapshot_date: input.snapshot_date.clone(),
        rehydrated_at: rehydrated_at.format("%Y-%m-%d").to_string(),
        turn_representation: TURN_REPRESENTATION.to_string(),
        dialogues,
        missing,
        notice: NOTICE.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn post(number: i64, author: &str, text: &str) -> (i64, Post) {
        (
            number,
            Post {
                number,
                author: author.to_string(),
                text: text.to_string(),
            },
        )
    }

    fn input(dialogues: &[(&str, Vec<Option<i64>>)]) -> DehydratedCorpus {
        DehydratedCorpus {
            thread_url: "https://forum.example/foro/hilo/1".to_string(),
            dialogues: dialogues
                .iter()
                .map(|(id, chain)| (id.to_string(), chain.clone()))
                .collect(),
            thread_id: None,
            snapshot_date: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn test_recovered_turns_keep_chain_order() {
        let posts: BTreeMap<_, _> = [
            post(1, "ana", "  hola\n  "),
            post(2, "bruno", "buenas"),
            post(3, "ana", "¿qué tal?"),
        ]
        .into_iter()
        .collect();
        let corpus = input(&[("d1", vec![Some(1), Some(2), Some(3)])]);

        let out = assemble(&corpus, &posts, date());

        assert_eq!(
            out.dialogues["d1"],
            vec![
                Some(Turn("A".to_string(), "hola".to_string())),
                Some(Turn("B".to_string(), "buenas".to_string())),
                Some(Turn("A".to_string(), "¿qué tal?".to_string())),
            ]
        );
        let stats = out.missing["d1"];
        assert_eq!(stats.n_turns, 3);
        assert_eq!(stats.n_missing, 0);
    }

    #[test]
    fn test_unresolved_posts_become_null_turns() {
        let posts: BTreeMap<_, _> = [post(1, "ana", "hola")].into_iter().collect();
        let corpus = input(&[("d1", vec![Some(1), Some(99), None])]);

        let out = assemble(&corpus, &posts, date());

        let turns = &out.dialogues["d1"];
        assert_eq!(turns.len(), 3);
        assert!(turns[0].is_some());
        assert!(turns[1].is_none());
        assert!(turns[2].is_none());
        assert_eq!(out.missing["d1"].n_missing, 2);
    }

    #[test]
    fn test_whitespace_only_post_counts_as_missing() {
        let posts: BTreeMap<_, _> = [post(1, "ana", " \n\t ")].into_iter().collect();
        let corpus = input(&[("d1", vec![Some(1)])]);

        let out = assemble(&corpus, &posts, date());

        assert_eq!(out.dialogues["d1"], vec![None]);
        assert_eq!(out.missing["d1"].n_missing, 1);
    }

    #[test]
    fn test_speaker_letters_span_dialogues() {
        let posts: BTreeMap<_, _> = [
            post(1, "ana", "uno"),
            post(2, "bruno", "dos"),
            post(3, "bruno", "tres"),
        ]
        .into_iter()
        .collect();
        let corpus = input(&[
            ("d1", vec![Some(1), Some(2)]),
            ("d2", vec![Some(3), Some(1)]),
        ]);

        let out = assemble(&corpus, &posts, date());

        let d1 = &out.dialogues["d1"];
        let d2 = &out.dialogues["d2"];
        // "ana" was seen first in d1, so it keeps letter A in d2 as well.
        assert_eq!(d1[0].as_ref().unwrap().0, "A");
        assert_eq!(d1[1].as_ref().unwrap().0, "B");
        assert_eq!(d2[0].as_ref().unwrap().0, "B");
        assert_eq!(d2[1].as_ref().unwrap().0, "A");
    }

    #[test]
    fn test_metadata_passthrough() {
        let mut corpus = input(&[("d1", vec![])]);
        corpus.thread_id = Some(serde_json::json!("t-77"));
        corpus.snapshot_date = Some("2023-01-15".to_string());

        let out = assemble(&corpus, &BTreeMap::new(), date());

        assert_eq!(out.format, FORMAT);
        assert_eq!(out.source, SOURCE);
        assert_eq!(out.thread_id, Some(serde_json::json!("t-77")));
        assert_eq!(out.snapshot_date.as_deref(), Some("2023-01-15"));
        assert_eq!(out.rehydrated_at, "2026-08-25");
        assert_eq!(out.turn_representation, TURN_REPRESENTATION);
        assert_eq!(out.notice, NOTICE);
    }
}
