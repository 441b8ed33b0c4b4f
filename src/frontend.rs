use crate::{
    browser,
    contact::{ContactForm, EmailJsConfig, SubmissionStatus},
    content::{
        NavItem, Project, SkillCategory, ABOUT, ABOUT_PARAGRAPHS, CERTIFICATE_URL, CONTACT,
        CV_DOWNLOAD_NAME, CV_PATH, EXPERIENCE, NAV_ITEMS, OWNER_NAME, PROJECTS, PROJECT_LIST,
        SKILLS, SKILL_CATEGORIES,
    },
    log::{LogLevel, Logger},
    scroll::{ScrollTracker, SectionId, TrackerConfig},
    theme::ThemeState,
};
use gloo_timers::callback::Timeout;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Element, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

const LOADING_SPLASH_MS: u32 = 1_000;
const NAVBAR_SOLID_OFFSET: f64 = 50.0;

type Tracker = ScrollTracker<Element>;

#[derive(Clone, Default, PartialEq)]
struct ScrollSnapshot {
    active: SectionId,
    progress: f64,
    offset: f64,
}

impl ScrollSnapshot {
    fn of(tracker: &Tracker) -> Self {
        let state = tracker.state();
        Self {
            active: state.active_section.clone(),
            progress: state.progress,
            offset: state.offset,
        }
    }
}

/// Owned by `App` for the lifetime of the page and handed to components that
/// register sections or navigate.
#[derive(Clone)]
struct ScrollHandle {
    tracker: Rc<RefCell<Tracker>>,
    suppression: Rc<RefCell<Option<Timeout>>>,
    snapshot: UseStateHandle<ScrollSnapshot>,
    logger: Logger,
}

impl PartialEq for ScrollHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tracker, &other.tracker)
    }
}

impl ScrollHandle {
    fn publish(&self) {
        let snapshot = ScrollSnapshot::of(&self.tracker.borrow());
        self.snapshot.set(snapshot);
    }

    fn register(&self, id: SectionId, element: Element) {
        self.tracker.borrow_mut().register(id, element);
    }

    fn unregister(&self, id: &SectionId) {
        self.tracker.borrow_mut().unregister(id);
    }

    fn refresh(&self) {
        let update = self.tracker.borrow_mut().on_scroll(browser::scroll_sample());
        if !update.is_empty() {
            self.publish();
        }
    }

    fn scroll_to(&self, id: &SectionId) {
        let request = self.tracker.borrow_mut().scroll_to_section(id);
        let Some(request) = request else {
            self.logger.log_event(
                LogLevel::Debug,
                "section_navigation_ignored",
                serde_json::json!({ "section": id.as_str() }),
            );
            return;
        };

        self.publish();
        browser::smooth_scroll_into_view(&request.handle);

        let tracker = Rc::clone(&self.tracker);
        let ticket = request.ticket;
        let window_ms = u32::try_from(request.suppression_window.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(window_ms, move || {
            tracker.borrow_mut().end_suppression(ticket);
        });
        // Dropping the previous timeout cancels it.
        *self.suppression.borrow_mut() = Some(timeout);

        self.logger.log_event(
            LogLevel::Info,
            "section_navigation",
            serde_json::json!({
                "section": request.section.as_str(),
                "suppression_ms": window_ms,
            }),
        );
    }
}

#[derive(Clone)]
struct ThemeHandle(Rc<ThemeState>);

impl PartialEq for ThemeHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[function_component(LoadingSplash)]
fn loading_splash() -> Html {
    html! {
        <div class="loading-splash" role="status">
            <span class="loading-spinner" aria-label="Loading"></span>
            <p class="loading-message">{"Welcome to my portfolio!"}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProgressBarProps {
    progress: f64,
}

#[function_component(ProgressBar)]
fn progress_bar(props: &ProgressBarProps) -> Html {
    let style = format!("transform: scaleX({:.4}); transform-origin: 0% 50%;", props.progress);

    html! {
        <div class="scroll-progress" aria-hidden="true">
            <div class="scroll-progress-fill" style={style}></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SectionWrapperProps {
    id: SectionId,
    scroll: ScrollHandle,
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Html,
}

#[function_component(SectionWrapper)]
fn section_wrapper(props: &SectionWrapperProps) -> Html {
    let node = use_node_ref();

    {
        let node = node.clone();
        let scroll = props.scroll.clone();
        use_effect_with(props.id.clone(), move |id| {
            if let Some(element) = node.cast::<Element>() {
                scroll.register(id.clone(), element);
            }

            let id = id.clone();
            move || scroll.unregister(&id)
        });
    }

    html! {
        <section
            id={props.id.to_string()}
            ref={node}
            class={classes!("section-wrapper", props.class.clone())}
        >
            {props.children.clone()}
        </section>
    }
}

fn navigate_callback(scroll: &ScrollHandle, id: &SectionId) -> Callback<MouseEvent> {
    let scroll = scroll.clone();
    let id = id.clone();
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        scroll.scroll_to(&id);
    })
}

#[derive(Properties, PartialEq)]
struct ThemeToggleProps {
    theme: ThemeHandle,
}

#[function_component(ThemeToggle)]
fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let current = use_state(|| props.theme.0.current());

    {
        let current = current.clone();
        use_effect_with(props.theme.clone(), move |theme| {
            let state = Rc::clone(&theme.0);
            let subscription = state.subscribe(move |next| current.set(next));
            move || {
                state.unsubscribe(subscription);
            }
        });
    }

    let on_toggle = {
        let theme = props.theme.clone();
        Callback::from(move |_: MouseEvent| {
            theme.0.toggle();
        })
    };

    let theme = *current;
    html! {
        <button
            class={classes!("theme-toggle", theme.as_str())}
            type="button"
            aria-label={theme.toggle_label()}
            aria-pressed={theme.pressed().to_string()}
            onclick={on_toggle}
        >
            <span aria-hidden="true">{theme.icon()}</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct NavbarProps {
    scroll: ScrollHandle,
    theme: ThemeHandle,
    active: SectionId,
    scrolled: bool,
}

#[function_component(Navbar)]
fn navbar(props: &NavbarProps) -> Html {
    let menu_open = use_state(|| false);

    let nav_link = |item: &NavItem, class: &'static str| {
        let onclick = {
            let navigate = navigate_callback(&props.scroll, &item.id);
            let menu_open = menu_open.clone();
            Callback::from(move |event: MouseEvent| {
                menu_open.set(false);
                navigate.emit(event);
            })
        };
        let is_active = props.active == item.id;

        html! {
            <button
                key={item.id.to_string()}
                type="button"
                class={classes!(class, is_active.then_some("is-active"))}
                aria-current={is_active.then_some("true")}
                onclick={onclick}
            >
                {item.label}
            </button>
        }
    };

    let open_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(true))
    };
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };
    let is_open = *menu_open;

    html! {
        <>
            <nav class={classes!("navbar", props.scrolled.then_some("is-scrolled"))}>
                <a
                    class="navbar-logo"
                    href="#header"
                    onclick={navigate_callback(&props.scroll, &SectionId::HEADER)}
                >
                    <img src="/logo.svg" alt={format!("{OWNER_NAME} logo")} width="100" height="72" />
                </a>

                <div class="navbar-links">
                    { for NAV_ITEMS.iter().map(|item| nav_link(item, "nav-link")) }
                </div>

                <div class="navbar-actions">
                    <ThemeToggle theme={props.theme.clone()} />
                    <a class="cv-download" href={CV_PATH} download={CV_DOWNLOAD_NAME}>
                        {"Download CV"}
                    </a>
                    <button
                        class="menu-open"
                        type="button"
                        aria-label="Open mobile menu"
                        aria-expanded={is_open.to_string()}
                        onclick={open_menu}
                    >
                        {"☰"}
                    </button>
                </div>
            </nav>

            <div
                class={classes!("mobile-menu-overlay", is_open.then_some("is-open"))}
                onclick={close_menu.clone()}
            ></div>
            <div class={classes!("mobile-menu", is_open.then_some("is-open"))}>
                <button
                    class="menu-close"
                    type="button"
                    aria-label="Close mobile menu"
                    onclick={close_menu.clone()}
                >
                    {"✕"}
                </button>
                { for NAV_ITEMS.iter().map(|item| nav_link(item, "mobile-nav-link")) }
                <a
                    class="cv-download"
                    href={CV_PATH}
                    download={CV_DOWNLOAD_NAME}
                    onclick={close_menu}
                >
                    {"Download CV"}
                </a>
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct SectionProps {
    scroll: ScrollHandle,
}

#[function_component(HeroSection)]
fn hero_section(props: &SectionProps) -> Html {
    html! {
        <div class="hero">
            <img class="hero-portrait" src="/displayLu.jpg" alt={format!("{OWNER_NAME} profile picture")} />
            <h3 class="hero-name">{OWNER_NAME.to_uppercase()}</h3>
            <h1 class="hero-title">{"Versatile & Driven Software Engineer"}</h1>
            <p class="hero-summary">
                {"Passionate about crafting efficient full-stack solutions. Turning ideas into reality \
                  through clean, innovative code and modern architectures."}
            </p>
            <div class="hero-actions">
                <a class="button-primary" href="#contact" onclick={navigate_callback(&props.scroll, &CONTACT)}>
                    {"Let's Talk"}
                </a>
                <a class="button-secondary" href="#projects" onclick={navigate_callback(&props.scroll, &PROJECTS)}>
                    {"Projects"}
                </a>
            </div>
        </div>
    }
}

#[function_component(AboutSection)]
fn about_section() -> Html {
    html! {
        <div class="about">
            <h2>{"About Me"}</h2>
            <div class="about-body">
                <img class="about-portrait" src="/profile2.jpg" alt={format!("{OWNER_NAME} profile picture")} />
                <div class="about-copy">
                    { for ABOUT_PARAGRAPHS.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                </div>
            </div>
            <div class="about-cards">
                <div class="about-card">
                    <h3>{"Education"}</h3>
                    <ul>
                        <li><strong>{"ALX Software Engineering Program"}</strong>{" – Back-end Specialization"}</li>
                        <li>
                            <a href={CERTIFICATE_URL} target="_blank" rel="noopener noreferrer">
                                {"View Certificate"}
                            </a>
                        </li>
                    </ul>
                </div>
                <div class="about-card">
                    <h3>{"Technical Experience"}</h3>
                    <ul>
                        { for EXPERIENCE.iter().map(|line| html! { <li>{*line}</li> }) }
                    </ul>
                </div>
            </div>
        </div>
    }
}

fn skill_card(category: &SkillCategory) -> Html {
    html! {
        <div key={category.title} class={classes!("skill-card", category.class)}>
            <h3>{category.title}</h3>
            <ul class="skill-list">
                { for category.skills.iter().map(|skill| html! {
                    <li key={skill.name}>
                        <img src={skill.icon} alt="" aria-hidden="true" />
                        {skill.name}
                    </li>
                }) }
            </ul>
        </div>
    }
}

#[function_component(SkillsSection)]
fn skills_section() -> Html {
    html! {
        <div class="skills">
            <h2>{"Skills"}</h2>
            <div class="skill-grid">
                { for SKILL_CATEGORIES.iter().map(skill_card) }
            </div>
        </div>
    }
}

fn project_card(project: &Project) -> Html {
    let design_link = match project.design_tool {
        Some(url) => html! {
            <a href={url} target="_blank" rel="noopener noreferrer">{"Design"}</a>
        },
        None => Html::default(),
    };

    html! {
        <article key={project.title} class="project-card">
            <div class="project-gallery">
                { for project.images.iter().map(|src| html! {
                    <img key={*src} src={*src} alt={format!("{} screenshot", project.title)} loading="lazy" />
                }) }
            </div>
            <h3>{project.title}</h3>
            <p>{project.description}</p>
            <ul class="project-features">
                { for project.features.iter().map(|feature| html! { <li>{*feature}</li> }) }
            </ul>
            <ul class="project-stack">
                { for project.tech_stack.iter().map(|tech| html! { <li>{*tech}</li> }) }
            </ul>
            <div class="project-links">
                <a href={project.github} target="_blank" rel="noopener noreferrer">{"GitHub"}</a>
                {design_link}
            </div>
        </article>
    }
}

#[function_component(ProjectsSection)]
fn projects_section() -> Html {
    html! {
        <div class="projects">
            <h2>{"Projects"}</h2>
            <div class="project-grid">
                { for PROJECT_LIST.iter().map(project_card) }
            </div>
        </div>
    }
}

#[derive(Clone)]
struct ContactFields {
    name: NodeRef,
    email: NodeRef,
    message: NodeRef,
}

impl ContactFields {
    fn read(&self) -> ContactForm {
        ContactForm {
            name: input_value(&self.name),
            email: input_value(&self.email),
            message: self
                .message
                .cast::<HtmlTextAreaElement>()
                .map(|field| field.value())
                .unwrap_or_default(),
        }
    }

    fn clear(&self) {
        for field in [&self.name, &self.email] {
            if let Some(input) = field.cast::<HtmlInputElement>() {
                input.set_value("");
            }
        }
        if let Some(field) = self.message.cast::<HtmlTextAreaElement>() {
            field.set_value("");
        }
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
struct ContactSectionProps {
    logger: Logger,
}

#[function_component(ContactSection)]
fn contact_section(props: &ContactSectionProps) -> Html {
    let fields = ContactFields {
        name: use_node_ref(),
        email: use_node_ref(),
        message: use_node_ref(),
    };
    let status = use_state(SubmissionStatus::default);

    let onsubmit = {
        let fields = fields.clone();
        let status = status.clone();
        let logger = props.logger;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if status.is_sending() {
                return;
            }

            let prepared = fields.read().validate().and_then(|message| {
                EmailJsConfig::from_build_env().map(|config| (config, message))
            });
            let (config, message) = match prepared {
                Ok(ready) => ready,
                Err(error) => {
                    logger.log_event(
                        LogLevel::Info,
                        "contact_submit_failed",
                        serde_json::json!({ "error_class": error.class() }),
                    );
                    status.set(SubmissionStatus::Failed(error.user_message()));
                    return;
                }
            };

            status.set(SubmissionStatus::Sending);
            logger.log_event(LogLevel::Info, "contact_submit_start", serde_json::json!({}));

            let fields = fields.clone();
            let status = status.clone();
            spawn_local(async move {
                match browser::send_contact_message(&config, &message).await {
                    Ok(()) => {
                        logger.log_event(
                            LogLevel::Info,
                            "contact_submit_complete",
                            serde_json::json!({}),
                        );
                        fields.clear();
                        status.set(SubmissionStatus::Sent);
                    }
                    Err(error) => {
                        logger.log_event(
                            LogLevel::Warn,
                            "contact_submit_failed",
                            serde_json::json!({
                                "error_class": error.class(),
                                "message": error.to_string(),
                            }),
                        );
                        status.set(SubmissionStatus::Failed(error.user_message()));
                    }
                }
            });
        })
    };

    let status_class = match &*status {
        SubmissionStatus::Failed(_) => "form-status is-error",
        _ => "form-status",
    };

    html! {
        <div class="contact">
            <h2>{"Let's Talk"}</h2>
            <p>{"Open to collaborations and new opportunities. Let's connect!"}</p>
            <form class="contact-form" onsubmit={onsubmit} novalidate={true}>
                <input ref={fields.name.clone()} type="text" name="name" placeholder="Name..." required={true} />
                <input ref={fields.email.clone()} type="email" name="email" placeholder="Your email..." required={true} />
                <textarea ref={fields.message.clone()} name="message" rows="5" placeholder="Message..." required={true} />
                <button type="submit" disabled={status.is_sending()}>{"Send Message"}</button>
            </form>
            <p class={status_class} role="status" aria-live="polite">
                {status.message().unwrap_or_default().to_string()}
            </p>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let logger = Logger::from_build_env();
    let loading = use_state(|| true);
    let tracker = use_mut_ref(|| Tracker::new(TrackerConfig::default()));
    let suppression = use_mut_ref(|| None::<Timeout>);
    let snapshot = use_state(ScrollSnapshot::default);
    let theme = use_memo((), |_| ThemeState::new(browser::initial_theme()));

    let scroll = ScrollHandle {
        tracker,
        suppression,
        snapshot: snapshot.clone(),
        logger,
    };

    {
        let loading = loading.clone();
        use_effect_with((), move |_| {
            let timeout = Timeout::new(LOADING_SPLASH_MS, move || loading.set(false));
            move || drop(timeout)
        });
    }

    {
        let scroll = scroll.clone();
        use_effect_with((), move |_| {
            let listeners = browser::listen_viewport(move || scroll.refresh());
            move || drop(listeners)
        });
    }

    {
        let theme = Rc::clone(&theme);
        use_effect_with((), move |_| {
            browser::apply_theme(theme.current());
            let subscription = theme.subscribe(move |next| {
                browser::persist_theme(next);
                browser::apply_theme_with_transition(next);
                logger.log_event(
                    LogLevel::Info,
                    "theme_changed",
                    serde_json::json!({ "theme": next.as_str() }),
                );
            });
            move || {
                theme.unsubscribe(subscription);
            }
        });
    }

    if *loading {
        return html! { <LoadingSplash /> };
    }

    html! {
        <>
            <ProgressBar progress={snapshot.progress} />
            <Navbar
                scroll={scroll.clone()}
                theme={ThemeHandle(Rc::clone(&theme))}
                active={snapshot.active.clone()}
                scrolled={snapshot.offset > NAVBAR_SOLID_OFFSET}
            />
            <main class="page">
                <SectionWrapper id={SectionId::HEADER} scroll={scroll.clone()} class={classes!("section-header")}>
                    <HeroSection scroll={scroll.clone()} />
                </SectionWrapper>
                <SectionWrapper id={ABOUT} scroll={scroll.clone()}>
                    <AboutSection />
                </SectionWrapper>
                <SectionWrapper id={SKILLS} scroll={scroll.clone()}>
                    <SkillsSection />
                </SectionWrapper>
                <SectionWrapper id={PROJECTS} scroll={scroll.clone()}>
                    <ProjectsSection />
                </SectionWrapper>
                <SectionWrapper id={CONTACT} scroll={scroll}>
                    <ContactSection logger={logger} />
                </SectionWrapper>
            </main>
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
