use anyhow::Result;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};
use wordfreq::{
    analyze, stopwords::is_countable, tokenizer::tokenize, AnalysisConfig, WordFrequency,
    WordTally, TOP_N,
};

fn create_test_files(dir: &TempDir, files: &[(&str, &str)]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for (name, content) in files {
        let path = dir.path().join(name);
        let mut file = File::create(&path)?;
        write!(file, "{}", content)?;
        paths.push(path);
    }
    Ok(paths)
}

fn config_for(paths: Vec<PathBuf>, threads: usize) -> AnalysisConfig {
    let mut config = AnalysisConfig::for_files(paths);
    config.thread_count = NonZeroUsize::new(threads).unwrap();
    config
}

/// Sequential reference count using the same tokenizer and filter
fn expected_counts(contents: &[&str]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for content in contents {
        for line in content.lines() {
            for token in tokenize(line) {
                if is_countable(&token) {
                    *counts.entry(token).or_insert(0) += 1;
                }
            }
        }
    }
    counts
}

#[test]
fn test_quick_fox_scenario() -> Result<()> {
    let dir = tempdir()?;
    let paths = create_test_files(
        &dir,
        &[("fox.txt", "The Quick fox jumps over the lazy fox.")],
    )?;

    let report = analyze(&config_for(paths, 1))?;
    assert_eq!(report.unique_words, 5);
    assert_eq!(report.total_words, 6);
    assert_eq!(report.files_processed, 1);
    assert_eq!(report.top_words[0], WordFrequency::new("fox", 2));

    let rest: Vec<&str> = report.top_words[1..]
        .iter()
        .map(|r| r.word.as_str())
        .collect();
    assert_eq!(rest, vec!["jumps", "lazy", "over", "quick"]);
    Ok(())
}

#[test]
fn test_tie_renders_alphabetically() -> Result<()> {
    let dir = tempdir()?;
    let paths = create_test_files(&dir, &[("a.txt", "cat cat dog"), ("b.txt", "dog dog cat")])?;

    let rendered = analyze(&config_for(paths, 4))?.render();
    let cat = rendered.find("1. cat: 3").expect("cat ranked first");
    let dog = rendered.find("2. dog: 3").expect("dog ranked second");
    assert!(cat < dog);
    assert!(rendered.ends_with("Total unique words: 2\nTotal word count: 6\nFiles processed: 2\n"));
    Ok(())
}

#[test]
fn test_stopwords_never_reported() -> Result<()> {
    let dir = tempdir()?;
    let text = "The the THE a an is to and or in at of for that\n\
                of of of of of of for for for for that that that\n\
                ... !!! ,,, word";
    let paths = create_test_files(&dir, &[("stop.txt", text)])?;

    let report = analyze(&config_for(paths, 2))?;
    assert_eq!(report.top_words, vec![WordFrequency::new("word", 1)]);
    assert_eq!(report.total_words, 1);
    Ok(())
}

#[test]
fn test_totals_match_sequential_count() -> Result<()> {
    let dir = tempdir()?;
    let contents: Vec<String> = (0..12)
        .map(|i| {
            (0..200)
                .map(|j| {
                    format!(
                        "Line {j} of file {i}: the word{} and item-{}'s note\n",
                        j % 7,
                        j % 3
                    )
                })
                .collect::<String>()
        })
        .collect();
    let files: Vec<(String, &str)> = contents
        .iter()
        .enumerate()
        .map(|(i, c)| (format!("file_{i}.txt"), c.as_str()))
        .collect();
    let named: Vec<(&str, &str)> = files.iter().map(|(n, c)| (n.as_str(), *c)).collect();
    let paths = create_test_files(&dir, &named)?;

    let expected = expected_counts(&contents.iter().map(String::as_str).collect::<Vec<_>>());
    let report = analyze(&config_for(paths, 4))?;

    assert_eq!(report.unique_words, expected.len());
    assert_eq!(report.total_words, expected.values().sum::<u64>());
    assert_eq!(report.top_words.len(), TOP_N.min(expected.len()));
    for entry in &report.top_words {
        assert_eq!(Some(&entry.count), expected.get(&entry.word));
    }
    Ok(())
}

#[test]
fn test_order_invariance_and_idempotence() -> Result<()> {
    let dir = tempdir()?;
    let paths = create_test_files(
        &dir,
        &[
            ("one.txt", "alpha beta gamma\nbeta gamma\n"),
            ("two.txt", "Gamma delta! delta, epsilon\n"),
            ("three.txt", "epsilon zeta eta theta alpha\n"),
        ],
    )?;

    let forward = analyze(&config_for(paths.clone(), 3))?;
    let mut reversed_paths = paths.clone();
    reversed_paths.reverse();
    let reversed = analyze(&config_for(reversed_paths, 1))?;
    let again = analyze(&config_for(paths, 3))?;

    assert_eq!(forward, reversed);
    assert_eq!(forward, again);
    assert_eq!(forward.render(), reversed.render());
    Ok(())
}

#[test]
fn test_bad_file_does_not_affect_others() -> Result<()> {
    let dir = tempdir()?;
    let mut paths = create_test_files(&dir, &[("good.txt", "apple banana apple")])?;
    paths.push(dir.path().join("does_not_exist.txt"));

    let report = analyze(&config_for(paths, 2))?;
    assert_eq!(report.files_processed, 2);
    assert_eq!(report.unique_words, 2);
    assert_eq!(report.top_words[0], WordFrequency::new("apple", 2));
    Ok(())
}

#[test]
fn test_top_entries_capped() -> Result<()> {
    let dir = tempdir()?;
    let text: String = (0..40).map(|i| format!("w{:02} ", i)).collect();
    let paths = create_test_files(&dir, &[("many.txt", text.as_str())])?;

    let report = analyze(&config_for(paths, 1))?;
    assert_eq!(report.unique_words, 40);
    assert_eq!(report.total_words, 40);
    assert_eq!(report.top_words.len(), TOP_N);
    assert_eq!(report.top_words[0].word, "w00");
    assert_eq!(report.top_words[TOP_N - 1].word, "w14");
    Ok(())
}

#[test]
fn test_tally_drain_after_shared_use() {
    let tally = WordTally::new();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..1000 {
                    tally.increment("word");
                }
            });
        }
    });

    assert_eq!(tally.drain(), vec![WordFrequency::new("word", 4000)]);
}
