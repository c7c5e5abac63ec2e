//! Five-element personality quiz: answers in, result page URL out

use url::Url;

use crate::error::{Error, Result};

pub const QUESTION_COUNT: usize = 10;
pub const RESULT_URL: &str = "https://ggeggsong.com/engineer-test1-result/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Choice {
    A,
    B,
    C,
    D,
    E,
}

impl Choice {
    pub const ALL: [Choice; 5] = [Choice::A, Choice::B, Choice::C, Choice::D, Choice::E];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Choice::A),
            'B' => Some(Choice::B),
            'C' => Some(Choice::C),
            'D' => Some(Choice::D),
            'E' => Some(Choice::E),
            _ => None,
        }
    }

    pub fn element(self) -> Element {
        match self {
            Choice::A => Element::Wood,
            Choice::B => Element::Fire,
            Choice::C => Element::Earth,
            Choice::D => Element::Metal,
            Choice::E => Element::Water,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub fn as_str(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }
}

/// Answers as a string of letters; `-`, `_` or space mark an unanswered question
pub fn parse_answers(s: &str) -> Result<Vec<Option<Choice>>> {
    s.chars()
        .filter(|c| *c != ',')
        .map(|c| match c {
            '-' | '_' | ' ' => Ok(None),
            c => Choice::from_char(c)
                .map(Some)
                .ok_or_else(|| Error::Message(format!("invalid answer '{}'", c))),
        })
        .collect()
}

pub fn tally(answers: &[Option<Choice>]) -> [usize; 5] {
    let mut scores = [0usize; 5];
    for choice in answers.iter().flatten() {
        scores[*choice as usize] += 1;
    }
    scores
}

/// Highest tally wins; a tie goes to the earlier letter, so an empty sheet is wood
pub fn result(answers: &[Option<Choice>]) -> Element {
    let scores = tally(answers);
    let mut best = Choice::A;
    for choice in Choice::ALL {
        if scores[choice as usize] > scores[best as usize] {
            best = choice;
        }
    }
    best.element()
}

pub fn result_url(base: &str, answers: &[Option<Choice>]) -> Result<String> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("type", result(answers).as_str());
    Ok(url.into())
}
