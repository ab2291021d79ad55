//! End-to-end pipeline integration tests
//!
//! Drives the full flow (records, prompts, tokens, training, merge,
//! package, extract) with scripted trainer/merger collaborators standing
//! in for the GPU-bound backends.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use triyaj::archive::{create_archive, extract_archive, list_entries};
use triyaj::dataset::{load_records, TriageRecord};
use triyaj::lora::LoraConfig;
use triyaj::merge::{run_merge, verify_essential_files, ModelMerger, ESSENTIAL_FILES};
use triyaj::prompt::format_training_prompt;
use triyaj::tokenizer::{CharTokenizer, TokenizedExample};
use triyaj::train::{run_training, SftTrainer, TrainError, TrainReport, TrainingArguments};

fn write_dataset(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("medical_data.json");
    fs::write(
        &path,
        r#"[
            {
                "input_text": "Nefes darlığı var",
                "symptoms": ["öksürük"],
                "urgency_label": "Acil",
                "response": "Hastaneye gidin",
                "reasoning": "Solunum sıkıntısı"
            },
            {
                "input_text": "Hafif baş ağrısı",
                "urgency_label": "Normal",
                "response": "Dinlenin"
            }
        ]"#,
    )
    .unwrap();
    path
}

fn tokenizer_for(records: &[TriageRecord]) -> CharTokenizer {
    let texts: Vec<String> = records
        .iter()
        .map(|r| format_training_prompt(r).unwrap())
        .collect();
    let corpus: Vec<&str> = texts.iter().map(String::as_str).collect();
    CharTokenizer::from_corpus(&corpus)
}

/// Trainer that writes a dummy adapter weight file.
struct ScriptedTrainer;

impl SftTrainer for ScriptedTrainer {
    fn train(
        &mut self,
        examples: &[TokenizedExample],
        args: &TrainingArguments,
    ) -> Result<TrainReport, TrainError> {
        // Fixed-length invariant holds for everything the driver feeds us
        for example in examples {
            assert_eq!(example.input_ids.len(), args.max_seq_length);
            assert_eq!(example.labels, example.input_ids);
        }
        Ok(TrainReport {
            steps_completed: args.max_steps.unwrap_or(0),
            final_loss: Some(1.3),
            examples_seen: examples.len(),
        })
    }

    fn save_adapter(&self, dir: &Path) -> Result<(), TrainError> {
        fs::write(dir.join("adapter_model.safetensors"), b"weights")?;
        Ok(())
    }
}

/// Merger that copies essential files into the output directory.
struct ScriptedMerger;

impl ModelMerger for ScriptedMerger {
    fn merge(
        &mut self,
        _base_model: &str,
        adapter_dir: &Path,
        output_dir: &Path,
    ) -> Result<(), triyaj::merge::MergeError> {
        assert!(adapter_dir.join("adapter_model.safetensors").exists());
        fs::create_dir_all(output_dir)?;
        for name in ESSENTIAL_FILES {
            fs::write(output_dir.join(name), format!("{{\"file\": \"{name}\"}}"))?;
        }
        fs::write(output_dir.join("model-00001-of-00004.safetensors"), "w")?;
        Ok(())
    }
}

#[test]
fn test_full_pipeline_train_merge_package_extract() {
    let work = TempDir::new().unwrap();
    let data_path = write_dataset(&work);

    // Stage 1: load + format + tokenize + train
    let records = load_records(&data_path).unwrap();
    let tokenizer = tokenizer_for(&records);
    let adapter_dir = work.path().join("vol").join("finetuned");
    let args = TrainingArguments::default().with_output_dir(&adapter_dir);

    let report = run_training(
        &records,
        &tokenizer,
        &mut ScriptedTrainer,
        &LoraConfig::default(),
        &args,
    )
    .unwrap();
    assert_eq!(report.examples_seen, 2);
    assert!(adapter_dir.join("adapter_config.json").exists());

    // Stage 2: merge + integrity check
    let merged_dir = work.path().join("vol").join("merged_model");
    let info = run_merge(
        &mut ScriptedMerger,
        "unsloth/llama-3-8b-bnb-4bit",
        &adapter_dir,
        &merged_dir,
    )
    .unwrap();
    assert_eq!(info.files.len(), 4);
    verify_essential_files(&merged_dir).unwrap();

    // Stage 3: package, list, extract
    let archive = work.path().join("merged_medical_model.tar.gz");
    create_archive(&merged_dir, &archive, "merged_model").unwrap();

    let listed = list_entries(&archive).unwrap();
    assert!(listed
        .iter()
        .any(|e| e.name == "merged_model/config.json"));

    let extract_dir = work.path().join("download");
    extract_archive(&archive, &extract_dir).unwrap();
    for name in ESSENTIAL_FILES {
        let original = fs::read(merged_dir.join(name)).unwrap();
        let extracted = fs::read(extract_dir.join("merged_model").join(name)).unwrap();
        assert_eq!(original, extracted);
    }
}

#[test]
fn test_formatted_record_contains_expected_substrings() {
    let record = TriageRecord {
        input_text: Some("Nefes darlığı var".to_string()),
        symptoms: vec!["öksürük".to_string()],
        urgency_label: "Acil".to_string(),
        response: "Hastaneye gidin".to_string(),
        reasoning: "Solunum sıkıntısı".to_string(),
    };

    let text = format_training_prompt(&record).unwrap();
    assert!(text.contains("Hasta şikayeti: Nefes darlığı var"));
    assert!(text.contains("semptomlar: öksürük"));
    assert!(text.contains("Aciliyet Seviyesi: Acil"));
}

#[test]
fn test_merge_integrity_failure_names_missing_file() {
    struct IncompleteMerger;

    impl ModelMerger for IncompleteMerger {
        fn merge(
            &mut self,
            _base_model: &str,
            _adapter_dir: &Path,
            output_dir: &Path,
        ) -> Result<(), triyaj::merge::MergeError> {
            fs::create_dir_all(output_dir)?;
            fs::write(output_dir.join("config.json"), "{}")?;
            fs::write(output_dir.join("model.safetensors.index.json"), "{}")?;
            // tokenizer.json deliberately absent
            Ok(())
        }
    }

    let work = TempDir::new().unwrap();
    let out = work.path().join("merged_model");

    let err = run_merge(&mut IncompleteMerger, "base", work.path(), &out).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("tokenizer.json"));
    assert!(!message.contains("config.json"));
}

#[test]
fn test_archive_round_trip_preserves_extra_files() {
    let work = TempDir::new().unwrap();
    let model = work.path().join("merged_model");
    fs::create_dir_all(&model).unwrap();
    for name in ESSENTIAL_FILES {
        fs::write(model.join(name), format!("content of {name}")).unwrap();
    }
    fs::write(model.join("generation_config.json"), "{}").unwrap();

    let archive = work.path().join("model.tar.gz");
    create_archive(&model, &archive, "merged_model").unwrap();

    let dest = work.path().join("out");
    let entries = extract_archive(&archive, &dest).unwrap();
    // Listing happened and includes every member
    assert!(entries.len() >= 4);

    for name in [
        "config.json",
        "model.safetensors.index.json",
        "tokenizer.json",
        "generation_config.json",
    ] {
        assert_eq!(
            fs::read(model.join(name)).unwrap(),
            fs::read(dest.join("merged_model").join(name)).unwrap(),
            "{name} not byte-identical"
        );
    }
}
