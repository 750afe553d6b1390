//! In-memory page, virtual clock and scripted transport for tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use turbo_data::{FetchError, FormFields, HttpTransport, Method, Request, Response};

use crate::{Document, Element, InteractionError, Platform};

type ClickHandler = Rc<RefCell<Box<dyn FnMut()>>>;
type SubmitHandler = Rc<RefCell<Box<dyn FnMut(FormFields)>>>;

const ROOT: usize = 0;

#[derive(Default)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    styles: HashMap<String, String>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
    click_handlers: Vec<ClickHandler>,
    submit_handlers: Vec<SubmitHandler>,
}

impl Node {
    fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.id.as_deref() == Some(id)
        } else {
            self.tag == selector
        }
    }
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn descendants(&self, from: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[from].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        out
    }

    fn detach(&mut self, id: usize) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }
    }
}

/// Arena-backed document. Node 0 is the body.
#[derive(Clone)]
pub struct FakeDocument {
    tree: Rc<RefCell<Tree>>,
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDocument {
    pub fn new() -> Self {
        let mut tree = Tree::default();
        tree.nodes.push(Node {
            tag: "body".to_string(),
            ..Node::default()
        });
        Self {
            tree: Rc::new(RefCell::new(tree)),
        }
    }

    pub fn body(&self) -> FakeElement {
        self.handle(ROOT)
    }

    /// Append a new `<tag>` under `parent`. `id` and `class` attributes
    /// are indexed like the browser does.
    pub fn add(&self, parent: &FakeElement, tag: &str, attrs: &[(&str, &str)]) -> FakeElement {
        let id = {
            let mut tree = self.tree.borrow_mut();
            let id = tree.nodes.len();
            let mut node = Node {
                tag: tag.to_string(),
                parent: Some(parent.id),
                ..Node::default()
            };
            for (name, value) in attrs {
                match *name {
                    "id" => node.id = Some(value.to_string()),
                    "class" => node.classes = value.split_whitespace().map(String::from).collect(),
                    _ => {
                        node.attrs.insert(name.to_string(), value.to_string());
                    }
                }
            }
            tree.nodes.push(node);
            tree.nodes[parent.id].children.push(id);
            id
        };
        self.handle(id)
    }

    fn handle(&self, id: usize) -> FakeElement {
        FakeElement {
            tree: Rc::clone(&self.tree),
            id,
        }
    }
}

impl Document for FakeDocument {
    type Element = FakeElement;

    fn query_selector_all(&self, selector: &str) -> Vec<FakeElement> {
        self.body().query_selector_all(selector)
    }

    fn get_element_by_id(&self, id: &str) -> Option<FakeElement> {
        let found = {
            let tree = self.tree.borrow();
            tree.descendants(ROOT)
                .into_iter()
                .find(|&n| tree.nodes[n].id.as_deref() == Some(id))
        };
        found.map(|n| self.handle(n))
    }

    fn create_element(&self, tag: &str) -> Result<FakeElement, InteractionError> {
        let id = {
            let mut tree = self.tree.borrow_mut();
            tree.nodes.push(Node {
                tag: tag.to_string(),
                ..Node::default()
            });
            tree.nodes.len() - 1
        };
        Ok(self.handle(id))
    }
}

/// Handle to a node in a [`FakeDocument`].
#[derive(Clone)]
pub struct FakeElement {
    tree: Rc<RefCell<Tree>>,
    id: usize,
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.id == other.id
    }
}

impl std::fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree.borrow();
        let node = &tree.nodes[self.id];
        write!(f, "<{} #{}>", node.tag, self.id)
    }
}

impl FakeElement {
    fn sibling(&self, id: usize) -> FakeElement {
        FakeElement {
            tree: Rc::clone(&self.tree),
            id,
        }
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.tree.borrow().nodes[self.id].styles.get(property).cloned()
    }

    pub fn text(&self) -> String {
        self.tree.borrow().nodes[self.id].text.clone()
    }

    pub fn class_name(&self) -> String {
        self.tree.borrow().nodes[self.id].classes.join(" ")
    }

    pub fn children(&self) -> Vec<FakeElement> {
        let ids = self.tree.borrow().nodes[self.id].children.clone();
        ids.into_iter().map(|id| self.sibling(id)).collect()
    }

    /// Whether the node is reachable from the body.
    pub fn is_attached(&self) -> bool {
        let tree = self.tree.borrow();
        let mut current = self.id;
        loop {
            if current == ROOT {
                return true;
            }
            match tree.nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Dispatch a click to every registered handler.
    pub fn click(&self) {
        let handlers = self.tree.borrow().nodes[self.id].click_handlers.clone();
        for handler in handlers {
            (handler.borrow_mut())();
        }
    }

    /// Dispatch a submit carrying `fields`.
    pub fn submit(&self, fields: FormFields) {
        let handlers = self.tree.borrow().nodes[self.id].submit_handlers.clone();
        for handler in handlers {
            (handler.borrow_mut())(fields.clone());
        }
    }
}

impl Element for FakeElement {
    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        let ids = {
            let tree = self.tree.borrow();
            tree.descendants(self.id)
                .into_iter()
                .filter(|&n| tree.nodes[n].matches(selector))
                .collect::<Vec<_>>()
        };
        ids.into_iter().map(|id| self.sibling(id)).collect()
    }

    fn next_element_sibling(&self) -> Option<Self> {
        let next = {
            let tree = self.tree.borrow();
            let parent = tree.nodes[self.id].parent?;
            let siblings = &tree.nodes[parent].children;
            let pos = siblings.iter().position(|&c| c == self.id)?;
            siblings.get(pos + 1).copied()
        };
        next.map(|id| self.sibling(id))
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let tree = self.tree.borrow();
        let node = &tree.nodes[self.id];
        match name {
            "id" => node.id.clone(),
            "class" => Some(node.classes.join(" ")),
            _ => node.attrs.get(name).cloned(),
        }
    }

    fn set_text_content(&self, text: &str) {
        self.tree.borrow_mut().nodes[self.id].text = text.to_string();
    }

    fn set_class_name(&self, class: &str) {
        self.tree.borrow_mut().nodes[self.id].classes =
            class.split_whitespace().map(String::from).collect();
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), InteractionError> {
        self.tree.borrow_mut().nodes[self.id]
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn append_child(&self, child: &Self) -> Result<(), InteractionError> {
        let mut tree = self.tree.borrow_mut();
        tree.detach(child.id);
        tree.nodes[child.id].parent = Some(self.id);
        tree.nodes[self.id].children.push(child.id);
        Ok(())
    }

    fn remove(&self) {
        self.tree.borrow_mut().detach(self.id);
    }

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Result<(), InteractionError> {
        self.tree.borrow_mut().nodes[self.id]
            .click_handlers
            .push(Rc::new(RefCell::new(handler)));
        Ok(())
    }

    fn on_submit(&self, handler: Box<dyn FnMut(FormFields)>) -> Result<(), InteractionError> {
        self.tree.borrow_mut().nodes[self.id]
            .submit_handlers
            .push(Rc::new(RefCell::new(handler)));
        Ok(())
    }
}

struct Timer {
    due_ms: u64,
    order: u64,
    task: Box<dyn FnOnce()>,
}

struct ManualInner {
    now_ms: Cell<u64>,
    next_order: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

/// Virtual clock plus a local executor.
///
/// Nothing runs until the test calls [`run_until_stalled`](Self::run_until_stalled)
/// or [`advance`](Self::advance).
#[derive(Clone)]
pub struct ManualPlatform {
    inner: Rc<ManualInner>,
}

impl Default for ManualPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualPlatform {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(ManualInner {
                now_ms: Cell::new(0),
                next_order: Cell::new(0),
                timers: RefCell::new(Vec::new()),
                pool: RefCell::new(pool),
                spawner,
            }),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.now_ms.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    /// Poll spawned tasks until none can make progress.
    pub fn run_until_stalled(&self) {
        self.inner.pool.borrow_mut().run_until_stalled();
    }

    /// Move the clock forward, firing due timers in (due, scheduling) order.
    /// Timers scheduled by a firing timer run too if they fall in the window.
    pub fn advance(&self, delta_ms: u64) {
        let target = self.now_ms() + delta_ms;
        loop {
            self.run_until_stalled();
            let next = {
                let timers = self.inner.timers.borrow();
                timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.order))
                    .map(|(i, _)| i)
            };
            let Some(index) = next else { break };
            let timer = self.inner.timers.borrow_mut().remove(index);
            self.inner.now_ms.set(timer.due_ms);
            (timer.task)();
        }
        self.inner.now_ms.set(target);
        self.run_until_stalled();
    }
}

impl Platform for ManualPlatform {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let order = self.inner.next_order.get();
        self.inner.next_order.set(order + 1);
        self.inner.timers.borrow_mut().push(Timer {
            due_ms: self.now_ms() + delay.as_millis() as u64,
            order,
            task,
        });
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.inner
            .spawner
            .spawn_local(task)
            .expect("local pool accepts tasks");
    }
}

#[derive(Default)]
struct TransportState {
    routes: HashMap<(Method, String), VecDeque<Result<Response, FetchError>>>,
    requests: Vec<Request>,
}

/// Transport answering from scripted replies and recording every request.
///
/// Replies for a route are consumed in order; the last one repeats.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Rc<RefCell<TransportState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, url: &str, reply: Result<Response, FetchError>) -> &Self {
        self.state
            .borrow_mut()
            .routes
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn reply_json(&self, method: Method, url: &str, body: &str) -> &Self {
        self.reply(method, url, Ok(Response::json_body(body.as_bytes().to_vec())))
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.borrow().requests.clone()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let mut state = self.state.borrow_mut();
        let key = (request.method, request.url.clone());
        state.requests.push(request);
        let queue = state
            .routes
            .get_mut(&key)
            .ok_or_else(|| FetchError::RequestError(format!("no reply for {}", key.1)))?;
        if queue.len() > 1 {
            queue
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::RequestError("empty".to_string())))
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(FetchError::RequestError("empty".to_string())))
        }
    }
}
