use log::*;
use quill_syntax::{tokenize, Token};
use std::fs;

/// A lexer test case, loaded from a TOML file under `tests/lexer`.
#[derive(serde::Deserialize)]
struct LexerTest {
    #[serde(default)]
    skip: bool,
    source: String,
    tokens: Option<Vec<Token>>,
    error: Option<String>,
}

impl LexerTest {
    fn load(path: impl AsRef<std::path::Path>) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }
}

#[test]
fn run_all_tests() -> Result<(), Box<dyn std::error::Error>> {
    stderrlog::new().verbosity(3).init()?;

    let mut count = 0;

    for path in glob::glob("tests/lexer/**/*.toml")?.filter_map(Result::ok) {
        let test = LexerTest::load(&path)?;
        let name = path.display().to_string();

        if test.skip {
            info!("skipping test: {}", name);
            continue;
        }

        info!("running test: {}", name);
        count += 1;

        match (tokenize(&test.source), test.tokens, test.error) {
            (Ok(actual), Some(expected), None) => {
                assert_eq!(actual, expected, "tokens do not match in {}", name);
            }
            (Err(actual), None, Some(expected)) => {
                assert!(
                    actual.message.contains(&expected),
                    "error in {} was `{}`, expected it to contain `{}`",
                    name,
                    actual,
                    expected,
                );
            }
            (result, _, _) => panic!("unexpected result in {}: {:?}", name, result),
        }
    }

    assert!(count > 0, "no lexer tests found");

    Ok(())
}
