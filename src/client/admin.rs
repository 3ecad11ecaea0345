use uuid::Uuid;

use super::auth::AuthClient;
use super::gallery::GalleryClient;
use super::http::{ApiClient, ClientError};
use super::news::NewsClient;
use super::payload::{FileAttachment, GalleryPayload, NewsPayload, RoutePayload};
use super::routes::RoutesClient;
use crate::models::{BikeRoute, GalleryImage, LoginRequest, NewsItem, UserProfile};

/// The confirmation hook for destructive actions. The UI shell supplies the
/// actual prompt; a declined confirmation means no service call is made.
pub type ConfirmFn = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Notice
///
/// One user-visible banner entry. Every failed admin action lands here so the
/// panel renders it; failures are reported, never just logged away.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
}

/// EditorMode
///
/// A modal editor is either creating a fresh entity or editing an existing
/// one, identified by its id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorMode {
    Add,
    Edit(Uuid),
}

/// Editor
///
/// The state machine behind one modal editor: closed, or open in add mode
/// (empty initial form) or edit mode (form pre-populated from the entity).
/// Closing without saving discards the draft; no draft state survives.
#[derive(Debug, Default)]
pub struct Editor<F> {
    state: Option<(EditorMode, F)>,
}

impl<F: Default + Clone> Editor<F> {
    pub fn open_add(&mut self) {
        self.state = Some((EditorMode::Add, F::default()));
    }

    pub fn open_edit(&mut self, id: Uuid, form: F) {
        self.state = Some((EditorMode::Edit(id), form));
    }

    /// Discards the draft unconditionally.
    pub fn close(&mut self) {
        self.state = None;
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn mode(&self) -> Option<EditorMode> {
        self.state.as_ref().map(|(mode, _)| *mode)
    }

    /// Mutable access to the open draft, for the form bindings.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        self.state.as_mut().map(|(_, form)| form)
    }

    fn snapshot(&self) -> Option<(EditorMode, F)> {
        self.state.clone()
    }
}

/// ContentCounts
///
/// The dashboard tile numbers. Always derived from the fetched lists on
/// demand, never tracked independently or incrementally adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentCounts {
    pub news: usize,
    pub events: usize,
    pub routes: usize,
    pub photos: usize,
}

/// AdminPanel
///
/// The orchestration layer behind the content-management screens. Holds the
/// cached copy of all three content lists (a reflection of the last
/// successful fetch, never a source of truth) and drives the resource
/// clients through a uniform mutation pattern: await the service call, then
/// either splice the server-returned entity into the local list or (for bulk
/// operations) refetch the collection outright.
///
/// Session teardown is centralized: any [`ClientError::AuthExpired`] clears
/// the cached lists, closes the editors, and raises `login_required`, which
/// the UI shell treats as the redirect to the login screen.
pub struct AdminPanel {
    auth: AuthClient,
    news: NewsClient,
    routes: RoutesClient,
    gallery: GalleryClient,

    pub news_items: Vec<NewsItem>,
    pub route_list: Vec<BikeRoute>,
    pub gallery_images: Vec<GalleryImage>,

    pub news_editor: Editor<NewsPayload>,
    pub route_editor: Editor<RoutePayload>,
    pub gallery_editor: Editor<GalleryPayload>,

    pub notices: Vec<Notice>,
    pub login_required: bool,

    confirm: ConfirmFn,
}

impl AdminPanel {
    pub fn new(api: ApiClient, confirm: ConfirmFn) -> Self {
        Self {
            auth: AuthClient::new(api.clone()),
            news: NewsClient::new(api.clone()),
            routes: RoutesClient::new(api.clone()),
            gallery: GalleryClient::new(api),
            news_items: vec![],
            route_list: vec![],
            gallery_images: vec![],
            news_editor: Editor::default(),
            route_editor: Editor::default(),
            gallery_editor: Editor::default(),
            notices: vec![],
            login_required: false,
            confirm,
        }
    }

    // --- Session ---

    /// login
    ///
    /// Authenticates and lowers the `login_required` flag. The failure notice
    /// carries the server's generic message unchanged.
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<UserProfile, ClientError> {
        match self.auth.login(credentials).await {
            Ok(profile) => {
                self.login_required = false;
                Ok(profile)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    /// logout
    ///
    /// Explicit logout: clears the token and tears the panel down. Idempotent.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.teardown();
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.auth.current_user().await
    }

    // --- View Model ---

    /// load_all
    ///
    /// Fetches the three collections concurrently and replaces each cached
    /// list wholesale on its own success. Returns the first failure, already
    /// reported as a notice (or as a session teardown).
    pub async fn load_all(&mut self) -> Result<(), ClientError> {
        let (news, routes, gallery) = tokio::join!(
            self.news.get_all(),
            self.routes.get_all(),
            self.gallery.get_all()
        );

        let mut first_error = None;
        match news {
            Ok(list) => self.news_items = list,
            Err(err) => first_error = first_error.or(Some(err)),
        }
        match routes {
            Ok(list) => self.route_list = list,
            Err(err) => first_error = first_error.or(Some(err)),
        }
        match gallery {
            Ok(list) => self.gallery_images = list,
            Err(err) => first_error = first_error.or(Some(err)),
        }

        match first_error {
            Some(err) => {
                self.report(&err);
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// counts
    ///
    /// Dashboard totals, derived purely from the fetched lists at call time.
    pub fn counts(&self) -> ContentCounts {
        ContentCounts {
            news: self
                .news_items
                .iter()
                .filter(|item| item.kind == "news")
                .count(),
            events: self
                .news_items
                .iter()
                .filter(|item| item.kind == "event")
                .count(),
            routes: self.route_list.len(),
            photos: self.gallery_images.len(),
        }
    }

    // --- News Actions ---

    pub fn add_news(&mut self) {
        self.news_editor.open_add();
    }

    /// Opens the news editor pre-populated from the cached entity. Returns
    /// false when the id is not in the cached list.
    pub fn edit_news(&mut self, id: Uuid) -> bool {
        match self.news_items.iter().find(|item| item.id == id) {
            Some(item) => {
                let form = NewsPayload::from(item);
                self.news_editor.open_edit(id, form);
                true
            }
            None => false,
        }
    }

    /// save_news
    ///
    /// Submits the open news editor. The editor is dismissed and the list
    /// updated only after the server confirms; on failure the draft stays
    /// open and a notice is raised. Ok(None) means no editor was open.
    pub async fn save_news(&mut self) -> Result<Option<NewsItem>, ClientError> {
        let Some((mode, form)) = self.news_editor.snapshot() else {
            return Ok(None);
        };

        let result = match mode {
            EditorMode::Add => self.news.create(form).await,
            EditorMode::Edit(id) => self.news.update(id, form).await,
        };

        match result {
            Ok(saved) => {
                self.news_editor.close();
                splice(&mut self.news_items, saved.clone(), |item| item.id);
                Ok(Some(saved))
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    /// delete_news
    ///
    /// Destructive and undoable by nothing: gated behind the confirmation
    /// hook. Ok(false) means the user declined and no call was made.
    pub async fn delete_news(&mut self, id: Uuid) -> Result<bool, ClientError> {
        if !(self.confirm)("Delete this news item?") {
            return Ok(false);
        }
        match self.news.delete(id).await {
            Ok(()) => {
                self.news_items.retain(|item| item.id != id);
                Ok(true)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    // --- Route Actions ---

    pub fn add_route(&mut self) {
        self.route_editor.open_add();
    }

    pub fn edit_route(&mut self, id: Uuid) -> bool {
        match self.route_list.iter().find(|route| route.id == id) {
            Some(route) => {
                let form = RoutePayload::from(route);
                self.route_editor.open_edit(id, form);
                true
            }
            None => false,
        }
    }

    pub async fn save_route(&mut self) -> Result<Option<BikeRoute>, ClientError> {
        let Some((mode, form)) = self.route_editor.snapshot() else {
            return Ok(None);
        };

        let result = match mode {
            EditorMode::Add => self.routes.create(form).await,
            EditorMode::Edit(id) => self.routes.update(id, form).await,
        };

        match result {
            Ok(saved) => {
                self.route_editor.close();
                splice(&mut self.route_list, saved.clone(), |route| route.id);
                Ok(Some(saved))
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    pub async fn delete_route(&mut self, id: Uuid) -> Result<bool, ClientError> {
        if !(self.confirm)("Delete this route?") {
            return Ok(false);
        }
        match self.routes.delete(id).await {
            Ok(()) => {
                self.route_list.retain(|route| route.id != id);
                Ok(true)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    // --- Gallery Actions ---

    pub fn add_gallery_image(&mut self) {
        self.gallery_editor.open_add();
    }

    pub fn edit_gallery_image(&mut self, id: Uuid) -> bool {
        match self.gallery_images.iter().find(|image| image.id == id) {
            Some(image) => {
                let form = GalleryPayload::from(image);
                self.gallery_editor.open_edit(id, form);
                true
            }
            None => false,
        }
    }

    pub async fn save_gallery_image(&mut self) -> Result<Option<GalleryImage>, ClientError> {
        let Some((mode, form)) = self.gallery_editor.snapshot() else {
            return Ok(None);
        };

        let result = match mode {
            EditorMode::Add => self.gallery.create(form).await,
            EditorMode::Edit(id) => self.gallery.update(id, form).await,
        };

        match result {
            Ok(saved) => {
                self.gallery_editor.close();
                splice(&mut self.gallery_images, saved.clone(), |image| image.id);
                Ok(Some(saved))
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    pub async fn delete_gallery_image(&mut self, id: Uuid) -> Result<bool, ClientError> {
        if !(self.confirm)("Delete this photo?") {
            return Ok(false);
        }
        match self.gallery.delete(id).await {
            Ok(()) => {
                self.gallery_images.retain(|image| image.id != id);
                Ok(true)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    /// upload_gallery_bulk
    ///
    /// The bulk path. Instead of reconciling the response into the cached
    /// list, the whole gallery collection is refetched; bulk operations are
    /// infrequent enough that a full refresh is the simpler contract.
    pub async fn upload_gallery_bulk(
        &mut self,
        files: Vec<FileAttachment>,
    ) -> Result<usize, ClientError> {
        let created = match self.gallery.upload_bulk(files).await {
            Ok(created) => created,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        };

        match self.gallery.get_all().await {
            Ok(list) => self.gallery_images = list,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        }

        Ok(created.len())
    }

    // --- Failure Routing ---

    /// report
    ///
    /// The single error-reporting path. A session rejection tears the panel
    /// down; everything else becomes a visible banner notice.
    fn report(&mut self, err: &ClientError) {
        if matches!(err, ClientError::AuthExpired) {
            self.teardown();
        }
        self.notices.push(Notice {
            message: err.to_string(),
        });
    }

    /// teardown
    ///
    /// Clears every cached list and draft and raises `login_required`. Runs on
    /// logout and on any 401.
    fn teardown(&mut self) {
        self.news_items.clear();
        self.route_list.clear();
        self.gallery_images.clear();
        self.news_editor.close();
        self.route_editor.close();
        self.gallery_editor.close();
        self.login_required = true;
    }
}

/// Replace the matching entity with the server-confirmed copy, or prepend a
/// newly created one (lists are rendered newest-first).
fn splice<T>(list: &mut Vec<T>, entity: T, id_of: impl Fn(&T) -> Uuid) {
    let id = id_of(&entity);
    match list.iter().position(|item| id_of(item) == id) {
        Some(pos) => list[pos] = entity,
        None => list.insert(0, entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_discards_draft_on_close() {
        let mut editor: Editor<NewsPayload> = Editor::default();
        assert!(!editor.is_open());

        editor.open_add();
        editor.form_mut().expect("open").title = Some("Черновик".to_string());
        editor.close();
        assert!(!editor.is_open());

        // Reopening starts from a clean form.
        editor.open_add();
        assert!(editor.form_mut().expect("open").title.is_none());
    }

    #[test]
    fn editor_edit_mode_carries_the_entity_id() {
        let id = Uuid::new_v4();
        let mut editor: Editor<NewsPayload> = Editor::default();
        editor.open_edit(id, NewsPayload::default());
        assert_eq!(editor.mode(), Some(EditorMode::Edit(id)));
    }

    #[test]
    fn splice_replaces_in_place_and_prepends_new() {
        let a = NewsItem {
            id: Uuid::new_v4(),
            title: "a".to_string(),
            ..Default::default()
        };
        let b = NewsItem {
            id: Uuid::new_v4(),
            title: "b".to_string(),
            ..Default::default()
        };
        let mut list = vec![a.clone(), b.clone()];

        let updated = NewsItem {
            title: "b2".to_string(),
            ..b.clone()
        };
        splice(&mut list, updated, |item| item.id);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].title, "b2");

        let fresh = NewsItem {
            id: Uuid::new_v4(),
            title: "c".to_string(),
            ..Default::default()
        };
        splice(&mut list, fresh.clone(), |item| item.id);
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].id, fresh.id);
    }

    #[test]
    fn counts_are_derived_from_the_lists() {
        let api = ApiClient::new("http://localhost:0");
        let mut panel = AdminPanel::new(api, Box::new(|_| true));

        panel.news_items = vec![
            NewsItem {
                kind: "news".to_string(),
                ..Default::default()
            },
            NewsItem {
                kind: "event".to_string(),
                ..Default::default()
            },
            NewsItem {
                kind: "news".to_string(),
                ..Default::default()
            },
        ];
        panel.route_list = vec![BikeRoute::default()];

        let counts = panel.counts();
        assert_eq!(counts.news, 2);
        assert_eq!(counts.events, 1);
        assert_eq!(counts.routes, 1);
        assert_eq!(counts.photos, 0);

        // Mutating the lists changes the next derivation; nothing is cached.
        panel.news_items.clear();
        assert_eq!(panel.counts().news, 0);
    }
}
