//! One run of the tool: the menu, the preference store and the view state,
//! plus the submit flow that turns a query into a transcript reply.

use std::sync::Arc;

use crate::agent::{RunOptions, Swarm, ToolPolicy};
use crate::api::CompletionBackend;
use crate::chat::{ChatClient, FALLBACK_MESSAGE};
use crate::error::Result;
use crate::menu::Menu;
use crate::models::{Message, Role};
use crate::preferences::{PreferenceKey, PreferenceStore, Preferences};
use crate::prompt::{compose_prompt, PromptTemplate};
use crate::ui::{ChatView, TranscriptEntry};
use crate::waiter::{waiter_agent, waiter_context};

/// How a submitted query gets answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Responder {
    /// Compose one prompt with the whole menu and take the first candidate.
    #[default]
    Prompt,
    /// Run the waiter agent, which browses the menu through tools.
    Agent {
        max_turns: Option<usize>,
        tool_policy: ToolPolicy,
    },
}

pub struct MenuSession<B, S> {
    backend: B,
    store: S,
    menu: Arc<Menu>,
    template: PromptTemplate,
    model: String,
    responder: Responder,
    debug: bool,
    view: ChatView,
    agent_history: Vec<Message>,
}

impl<B: CompletionBackend, S: PreferenceStore> MenuSession<B, S> {
    pub fn new(
        backend: B,
        store: S,
        menu: Arc<Menu>,
        template: PromptTemplate,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            store,
            menu,
            template,
            model: model.into(),
            responder: Responder::default(),
            debug: false,
            view: ChatView::new(),
            agent_history: Vec::new(),
        }
    }

    pub fn with_responder(mut self, responder: Responder) -> Self {
        self.responder = responder;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn view(&self) -> &ChatView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ChatView {
        &mut self.view
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn preferences(&self) -> Result<Preferences> {
        Preferences::load(&self.store)
    }

    pub fn set_preference(&self, key: PreferenceKey, value: &str) -> Result<()> {
        self.store.write(key, value)
    }

    pub fn clear_preferences(&self) -> Result<()> {
        self.store.clear()
    }

    /// The prompt a query would be sent as, with the preferences stored now.
    pub fn compose(&self, query: &str) -> Result<String> {
        let preferences = self.preferences()?;
        Ok(compose_prompt(query, &self.menu, &preferences, &self.template))
    }

    /// Records `query`, waits for the reply and appends it to the
    /// transcript. On failure the in-flight flag is cleared and the error
    /// is returned untouched.
    pub async fn submit(&mut self, query: &str) -> Result<&TranscriptEntry> {
        self.view.set_query(query);
        let query = self.view.begin_submit()?;

        match self.respond(&query).await {
            Ok(reply) => Ok(self.view.finish_submit(reply)),
            Err(e) => {
                self.view.abort_submit();
                Err(e)
            }
        }
    }

    async fn respond(&mut self, query: &str) -> Result<String> {
        match self.responder {
            Responder::Prompt => {
                let prompt = self.compose(query)?;
                let client = ChatClient::new(&self.backend, self.model.clone());
                client.suggest(&prompt).await
            }
            Responder::Agent {
                max_turns,
                tool_policy,
            } => {
                let preferences = self.preferences()?;
                let agent = waiter_agent(Arc::clone(&self.menu), &preferences, &self.template);
                let swarm = Swarm::with_default_model(&self.backend, self.model.clone());

                let checkpoint = self.agent_history.len();
                self.agent_history.push(Message::user(query));
                let options = RunOptions {
                    context_variables: waiter_context(&self.template),
                    max_turns,
                    debug: self.debug,
                    tool_policy,
                };
                // A failed run can leave tool calls without results, which the
                // endpoint rejects on every later request.
                if let Err(e) = swarm.run(&agent, &mut self.agent_history, options).await {
                    self.agent_history.truncate(checkpoint);
                    return Err(e);
                }

                Ok(last_reply(&self.agent_history))
            }
        }
    }
}

/// Text of the newest assistant message, or the fallback when the run
/// ended without one (for example on the turn limit).
fn last_reply(history: &[Message]) -> String {
    history
        .iter()
        .rev()
        .take_while(|m| m.role != Role::User)
        .find(|m| m.role == Role::Assistant && !m.requests_tools())
        .and_then(|m| m.content.clone())
        .filter(|content| !content.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
