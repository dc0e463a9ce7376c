use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CommentList, FeedStatus, TitleBar};

/// Draws the whole screen: title line, comment thread, composer, and the
/// login overlay when it is open.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let composer_height = tui.composer.height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(composer_height)]);
    let [title_area, main_area, composer_area] = layout.areas(frame.area());

    TitleBar::new(
        app.post_id.clone(),
        app.status_message.clone(),
        app.pending_comments,
    )
    .render(frame, title_area);

    let feed_status = match (&app.feed_error, app.cache.is_stale(&app.feed_key)) {
        (Some(e), _) => FeedStatus::Failed(e),
        (None, true) => FeedStatus::Refreshing,
        (None, false) => FeedStatus::Fresh,
    };
    CommentList::new(
        &mut tui.comment_list,
        app.selected_post(),
        app.post_id.is_some(),
    )
    .with_feed_status(feed_status)
    .render(frame, main_area);

    tui.composer.render(frame, composer_area);

    if let Some(modal) = &tui.login_modal {
        modal.render(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, Effect, update};
    use crate::core::session::SessionStatus;
    use crate::test_support::{sample_page, signed_in_app, test_app};
    use crate::tui::components::LoginModalState;
    use crate::tui::components::composer::BUTTON_LABEL;
    use crate::tui::components::input_box::PLACEHOLDER;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn with_feed(mut app: App) -> App {
        let Effect::FetchPosts { key, generation } = update(&mut app, Action::RefreshFeed) else {
            panic!("Expected FetchPosts");
        };
        update(
            &mut app,
            Action::PostsFetched {
                key,
                generation,
                result: Ok(sample_page()),
            },
        );
        app
    }

    #[test]
    fn test_draw_loading() {
        let app = test_app();
        let mut tui = TuiState::new(6);
        let text = render(&app, &mut tui);
        assert!(text.contains("Commenter (post: p1)"));
        assert!(text.contains("Loading session..."));
    }

    #[test]
    fn test_draw_signed_in_thread() {
        let app = with_feed(signed_in_app());
        let mut tui = TuiState::new(6);
        tui.composer.session = app.session.clone();
        let text = render(&app, &mut tui);
        assert!(text.contains("Hello forum"));
        assert!(text.contains("welcome"));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains(BUTTON_LABEL));
    }

    #[test]
    fn test_draw_marks_refreshing_after_settle() {
        let mut app = with_feed(signed_in_app());
        let mut tui = TuiState::new(6);
        tui.composer.session = app.session.clone();
        update(&mut app, Action::Submit("hi".to_string()));
        update(&mut app, Action::CommentSettled(Err("boom".to_string())));

        assert!(render(&app, &mut tui).contains("refreshing"));
    }

    #[test]
    fn test_draw_failed_feed_hint() {
        let mut app = test_app();
        let Effect::FetchPosts { key, generation } = update(&mut app, Action::RefreshFeed) else {
            panic!("Expected FetchPosts");
        };
        update(
            &mut app,
            Action::PostsFetched {
                key,
                generation,
                result: Err("connection refused".to_string()),
            },
        );
        let mut tui = TuiState::new(6);

        assert!(render(&app, &mut tui).contains("Could not load the feed: connection refused"));
    }

    #[test]
    fn test_draw_login_overlay() {
        let mut app = test_app();
        app.session = SessionStatus::Unauthenticated;
        let mut tui = TuiState::new(6);
        tui.composer.session = app.session.clone();
        tui.login_modal = Some(LoginModalState::new(app.client.sign_in_url()));
        let text = render(&app, &mut tui);
        assert!(text.contains("Sign in to comment"));
    }
}
