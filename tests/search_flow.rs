use cinemapa::app::{handle_event, Action, AppState, Event};
use cinemapa::client::{Endpoints, RequestKind};
use cinemapa::domain::Notice;
use cinemapa::ui::Theme;

const MATRIX_FOUND: &[u8] = include_bytes!("fixtures/matrix_found.json");
const MOVIE_NOT_FOUND: &[u8] = include_bytes!("fixtures/movie_not_found.json");

fn mounted() -> AppState {
    let mut state = AppState::new(Endpoints::default(), Theme::default());
    handle_event(&mut state, &Event::Mount).unwrap();
    state
}

/// Types `title`, presses the search button and returns the issued kind.
fn search(state: &mut AppState, title: &str) -> Option<RequestKind> {
    state.search_query.clear();
    for c in title.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
    let (_, actions) = handle_event(state, &Event::SubmitSearch).unwrap();
    match actions.as_slice() {
        [Action::SendRequest(request)] => Some(request.kind),
        [] => None,
        other => panic!("unexpected actions: {other:?}"),
    }
}

fn respond(state: &mut AppState, kind: RequestKind, body: &[u8]) {
    let event = Event::WebResponse {
        kind,
        status: 200,
        body: body.to_vec(),
    };
    handle_event(state, &event).unwrap();
}

#[test]
fn known_title_fills_movie_block() {
    let mut state = mounted();
    let kind = search(&mut state, "Matrix").expect("request issued");
    respond(&mut state, kind, MATRIX_FOUND);

    let vm = state.compute_viewmodel(40, 100);
    let movie = vm.movie.expect("movie block");
    assert_eq!(movie.title, "The Matrix");
    assert_eq!(movie.details[0], "Ano: 1999");
    assert_eq!(movie.details[2], "Diretor: Lana Wachowski, Lilly Wachowski");
    assert!(vm.notice.is_none());
}

#[test]
fn blank_titles_issue_no_request_and_one_notice_each() {
    for title in ["", "   ", "\t"] {
        let mut state = mounted();
        assert_eq!(search(&mut state, title), None);
        assert_eq!(state.search_generation, 0);
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices.front(), Some(&Notice::invalid_title()));
    }
}

#[test]
fn identical_searches_do_not_accumulate() {
    let mut state = mounted();
    let first = search(&mut state, "Matrix").unwrap();
    respond(&mut state, first, MATRIX_FOUND);
    let after_first = state.movie.clone();

    let second = search(&mut state, "Matrix").unwrap();
    respond(&mut state, second, MATRIX_FOUND);

    assert_eq!(state.movie, after_first);
    assert!(state.notices.is_empty());
}

#[test]
fn not_found_keeps_previous_movie() {
    let mut state = mounted();
    let found = search(&mut state, "Matrix").unwrap();
    respond(&mut state, found, MATRIX_FOUND);

    let missing = search(&mut state, "zzznonexistentmovie").unwrap();
    respond(&mut state, missing, MOVIE_NOT_FOUND);

    assert_eq!(state.movie.as_ref().map(|m| m.title.as_str()), Some("The Matrix"));
    let notice = state.notices.front().expect("not-found notice");
    assert_eq!(notice.title, "Erro");
    assert_eq!(notice.message, "Filme não encontrado. Verifique o título e tente novamente.");
}

#[test]
fn transport_failure_uses_its_own_message() {
    let mut state = mounted();
    let kind = search(&mut state, "Matrix").unwrap();
    respond(&mut state, kind, b"<html>502 Bad Gateway</html>");

    assert!(state.movie.is_none());
    assert_eq!(
        state.notices.front().map(|n| n.message.as_str()),
        Some("Houve um problema na busca do filme. Tente novamente mais tarde.")
    );
}

#[test]
fn last_issued_search_wins_regardless_of_arrival_order() {
    let mut state = mounted();
    let older = search(&mut state, "zzznonexistentmovie").unwrap();
    let newer = search(&mut state, "Matrix").unwrap();

    respond(&mut state, newer, MATRIX_FOUND);
    respond(&mut state, older, MOVIE_NOT_FOUND);

    assert_eq!(state.movie.as_ref().map(|m| m.title.as_str()), Some("The Matrix"));
    assert!(state.notices.is_empty());
}

#[test]
fn notice_blocks_typing_until_dismissed() {
    let mut state = mounted();
    search(&mut state, " ");
    handle_event(&mut state, &Event::Char('x')).unwrap();
    assert_eq!(state.search_query, " ");

    handle_event(&mut state, &Event::DismissNotice).unwrap();
    handle_event(&mut state, &Event::Char('x')).unwrap();
    assert_eq!(state.search_query, " x");
}
