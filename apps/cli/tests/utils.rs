#![allow(dead_code)]

use gdax_test_utils::MockExchange;
use gdaxcli::{AssumeYes, CliResult, Command, Prompt, Session, SessionOptions};
use std::cell::RefCell;
use std::rc::Rc;

/// Answers every confirmation with a fixed value and remembers the questions
#[derive(Clone)]
pub struct ScriptedPrompt {
    answer: bool,
    questions: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            questions: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str) -> CliResult<bool> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(self.answer)
    }
}

/// Session against the mock with plain output and confirmations skipped
pub fn session(server: &MockExchange) -> Session {
    Session::new(server.client(), SessionOptions::default(), Box::new(AssumeYes))
}

pub fn session_with_prompt(server: &MockExchange, prompt: ScriptedPrompt) -> Session {
    Session::new(server.client(), SessionOptions::default(), Box::new(prompt))
}

pub fn words(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Run `gdaxcli order <args>` against the mock
pub async fn order(server: &MockExchange, args: &[&str]) -> CliResult<String> {
    let command = Command::from_order_args(&words(args))?;
    session(server).run(command).await
}
