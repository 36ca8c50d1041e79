//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    std::fs::create_dir_all("banks")?;
    let sample_path = std::path::Path::new("banks/sample.json");
    if sample_path.exists() {
        println!("banks/sample.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_BANK)?;
        println!("Created banks/sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizdeck validate --bank banks/sample.json");
    println!("  2. Run: quizdeck take --page /sample");
    println!("  3. Point `base` in quizdeck.toml at your own banks");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

# Directory or http(s) URL that relative bank resources are resolved against.
# base = "https://example.org/SeidExam"

# Where answer statuses are kept. Defaults to ~/.local/share/quizdeck/storage.json.
# store_path = "${HOME}/.quizdeck-storage.json"

sample_size = 25

# Keep the xarici-dil, information-technologies, it-esaslari and az-dili pages.
builtin_topics = true

[scoring]
correct_points = 2
incorrect_points = -1
pass_mark = 17

[[topics]]
resource = "./banks/sample.json"
paths = ["/sample", "/sample.html"]
"#;

const SAMPLE_BANK: &str = r#"[
  {
    "questionNumber": 1,
    "questionUp": "Which unit is used to measure electrical resistance?",
    "questionDown": "",
    "answers": [{"A": "Volt"}, {"B": "Ohm"}, {"C": "Ampere"}, {"D": "Watt"}],
    "correctAnwser": "B"
  },
  {
    "questionNumber": 2,
    "questionUp": "How many bits are in one byte?",
    "questionDown": "",
    "answers": [{"A": "4"}, {"B": "16"}, {"C": "8"}, {"D": "32"}, {"E": "2"}],
    "correctAnwser": "C"
  },
  {
    "questionNumber": 3,
    "questionUp": "Which of these is an input device?",
    "questionDown": "Choose one.",
    "answers": [{"A": "Monitor"}, {"B": "Printer"}, {"C": "Keyboard"}],
    "correctAnwser": "C"
  },
  {
    "questionNumber": 4,
    "questionUp": "What does CPU stand for?",
    "questionDown": "",
    "answers": [{"A": "Central Processing Unit"}, {"B": "Computer Power Unit"}, {"C": "Core Program Utility"}],
    "correctAnwser": "A"
  },
  {
    "questionNumber": 5,
    "questionUp": "Which number system uses only the digits 0 and 1?",
    "questionDown": "",
    "answers": [{"A": "Decimal"}, {"B": "Hexadecimal"}, {"C": "Octal"}, {"D": "Binary"}],
    "correctAnwser": "D"
  }
]
"#;
