//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    std::fs::create_dir_all("data")?;
    let sample_path = std::path::Path::new("data/sample.json");
    if sample_path.exists() {
        println!("data/sample.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_QUIZ)?;
        println!("Created data/sample.json");
    }

    let users_path = std::path::Path::new("users.json");
    if users_path.exists() {
        println!("users.json already exists, skipping.");
    } else {
        std::fs::write(users_path, SAMPLE_USERS)?;
        println!("Created users.json (admin / change-me)");
    }

    println!("\nNext steps:");
    println!("  1. Change the admin password in users.json");
    println!("  2. Drop question files into data/");
    println!("  3. Run: quizdeck serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

data_dir = "data"
users_file = "users.json"
bind = "127.0.0.1:8000"
"#;

const SAMPLE_QUIZ: &str = r#"{
  "items": [
    {
      "entry": {
        "title": "Sample question",
        "itemBody": "<p>Which answer is correct?</p>",
        "interactionData": {
          "choices": [
            {"id": "c1", "itemBody": "This one"},
            {"id": "c2", "itemBody": "Not this one"},
            {"id": "c3", "itemBody": "Definitely not this one"}
          ]
        },
        "scoringData": {"value": "c1"},
        "answerFeedback": {
          "c1": "Right.",
          "neutral": "The first choice was correct."
        }
      }
    },
    {
      "question": "Legacy records work too. Pick B.",
      "choices": ["Option A", "Option B"],
      "answer": "B"
    }
  ]
}
"#;

const SAMPLE_USERS: &str = r#"{
  "users": [
    {
      "id": "admin",
      "password": "change-me",
      "name": "Administrator",
      "role": "admin",
      "expiry": null
    }
  ]
}
"#;
