use std::sync::{Arc, Mutex};

use contentfeed::feed::*;
use contentfeed::models::*;
use contentfeed::FeedError;
use speculate2::speculate;

const T1: &str = "2024-01-01T00:00:00Z";
const T2: &str = "2024-01-03T00:00:00Z";
const T3: &str = "2024-01-02T00:00:00Z";

type Log = Arc<Mutex<Vec<String>>>;

fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).expect("Bad timestamp")
}

fn ada() -> UserRef {
    UserRef::new("11", "Ada")
}

fn comment(id: &str, created_at: &str) -> Comment {
    Comment {
        id: id.to_string(),
        message: format!("comment {}", id),
        tagged_message: None,
        created_at: ts(created_at),
        created_by: ada(),
        modified_at: None,
        is_reply_comment: false,
        permissions: CommentPermissions::default(),
        is_pending: false,
    }
}

fn task(id: &str, created_at: &str) -> Task {
    Task {
        id: id.to_string(),
        message: format!("task {}", id),
        created_at: ts(created_at),
        created_by: ada(),
        due_at: None,
        assignments: Collection::default(),
        is_pending: false,
    }
}

fn version(id: &str, number: u32, created_at: &str) -> VersionEvent {
    VersionEvent {
        id: id.to_string(),
        version_number: number,
        created_at: ts(created_at),
        modified_by: ada(),
        action: VersionAction::Upload,
        trashed_at: None,
    }
}

fn ids(items: &[FeedItem]) -> Vec<String> {
    items
        .iter()
        .map(|i| format!("{}:{}", i.kind().as_str(), i.id()))
        .collect()
}

/// Comments, tasks and versions all loaded.
fn ready_state() -> FeedState {
    let mut state = FeedState::default();
    state.set_comments(vec![comment("1", T1)]);
    state.set_tasks(vec![task("2", T3)]);
    state.set_versions(vec![]);
    state
}

fn recording_handlers(log: &Log) -> FeedHandlers {
    let l = log.clone();
    let create_comment: Handler<CreateCommentArgs> = Box::new(move |args: CreateCommentArgs| {
        l.lock()
            .unwrap()
            .push(format!("comment:create:{}", args.text))
    });
    let l = log.clone();
    let delete_comment: Handler<DeleteArgs> = Box::new(move |args: DeleteArgs| {
        l.lock()
            .unwrap()
            .push(format!("comment:delete:{}", args.id))
    });
    let l = log.clone();
    let delete_task: Handler<DeleteArgs> = Box::new(move |args: DeleteArgs| {
        l.lock().unwrap().push(format!("task:delete:{}", args.id))
    });
    let l = log.clone();
    let assignment: Handler<TaskAssignmentUpdate> = Box::new(move |u: TaskAssignmentUpdate| {
        l.lock().unwrap().push(format!(
            "assignment:{}:{}:{}",
            u.task_id,
            u.assignment_id,
            u.status.as_str()
        ))
    });
    let l = log.clone();
    let info: Handler<VersionInfoArgs> = Box::new(move |args: VersionInfoArgs| {
        l.lock()
            .unwrap()
            .push(format!("version:{}", args.version_number))
    });

    FeedHandlers {
        comments: Some(CommentHandlers {
            create: Some(create_comment),
            delete: Some(delete_comment),
        }),
        tasks: Some(TaskHandlers {
            delete: Some(delete_task),
            on_task_assignment_update: Some(assignment),
            ..TaskHandlers::default()
        }),
        versions: Some(VersionHandlers { info: Some(info) }),
        contacts: Some(ContactHandlers {
            get_approver_with_query: Some(Box::new(|q: &str| vec![UserRef::new("1", q)])),
            get_mention_with_query: None,
        }),
    }
}

fn all_permissions() -> FeedPermissions {
    FeedPermissions {
        comments: true,
        tasks: true,
    }
}

fn recording_feed(log: &Log) -> ActivityFeed {
    ActivityFeed::new(
        FeedState::default(),
        recording_handlers(log),
        all_permissions(),
    )
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

speculate! {
    describe "merging" {
        it "orders sources newest first" {
            let mut state = FeedState::default();

            state.set_comments(vec![comment("1", T1)]);
            state.set_tasks(vec![task("2", T2)]);
            state.set_versions(vec![version("3", 2, T3)]);

            assert_eq!(ids(state.items()), vec!["task:2", "file_version:3", "comment:1"]);
        }

        it "waits for every source" {
            let mut state = FeedState::default();

            state.set_comments(vec![comment("1", T1)]);
            state.set_tasks(vec![task("2", T2)]);

            assert!(!state.is_ready());
            assert!(state.items().is_empty());
            assert!(state.source_items(FeedSource::Versions).is_none());
            assert_eq!(state.source_items(FeedSource::Comments).map(<[FeedItem]>::len), Some(1));
        }

        it "keeps the previous feed while a source is pending" {
            let mut state = ready_state();
            let before = state.items().to_vec();

            state.mark_pending(FeedSource::Tasks);
            state.set_comments(vec![comment("1", T1), comment("4", T2)]);

            assert_eq!(state.items(), before.as_slice());
            assert!(!state.is_ready());

            state.set_tasks(vec![]);
            assert_eq!(ids(state.items()), vec!["comment:4", "comment:1"]);
        }

        it "counts empty sources as ready" {
            let mut state = FeedState::default();
            state.set_comments(vec![]);
            state.set_tasks(vec![]);
            state.set_versions(vec![]);

            assert!(state.is_ready());
            assert!(state.should_show_empty_state());
        }

        it "includes app activity when enabled" {
            let mut state = FeedState::new(&FeedSource::ALL);
            state.set_comments(vec![comment("1", T1)]);
            state.set_tasks(vec![]);
            state.set_versions(vec![]);
            assert!(state.items().is_empty());

            state.set_app_activity(vec![map_app_activity_item(RawAppActivity {
                id: "a1".to_string(),
                occurred_at: ts(T2),
                rendered_text: String::new(),
                created_by: None,
                app: None,
                activity_template: None,
            })]);

            assert_eq!(ids(state.items()), vec!["app_activity:a1", "comment:1"]);
        }

        it "ignores duplicate sources" {
            let state = FeedState::new(&[FeedSource::Comments, FeedSource::Comments]);
            assert_eq!(state.sources(), &[FeedSource::Comments]);
        }
    }

    describe "stale_responses" {
        before {
            let mut state = FeedState::new(&[FeedSource::Comments]);
            let first = state.begin_fetch(FeedSource::Comments);
            let second = state.begin_fetch(FeedSource::Comments);
        }

        it "discards an older response arriving after a newer one" {
            assert!(state.apply(second, vec![comment("new", T2).into()]));
            assert!(!state.apply(first, vec![comment("old", T1).into()]));

            assert_eq!(ids(state.items()), vec!["comment:new"]);
        }

        it "applies responses arriving in order" {
            assert!(state.apply(first, vec![comment("old", T1).into()]));
            assert!(state.apply(second, vec![comment("new", T2).into()]));

            assert_eq!(ids(state.items()), vec!["comment:new"]);
            assert_eq!(second.source(), FeedSource::Comments);
        }
    }

    describe "local_mutations" {
        before {
            let mut state = ready_state();
        }

        it "shows a placeholder until it is resolved" {
            let placeholder = Comment::placeholder(ada(), "draft");
            let local_id = placeholder.id.clone();

            state.insert_placeholder(placeholder.into());
            assert!(state.items()[0].is_pending());

            assert!(state.resolve_placeholder(&local_id, comment("9", T2).into()));
            assert_eq!(ids(state.items()), vec!["comment:9", "task:2", "comment:1"]);
            assert!(state.items().iter().all(|i| !i.is_pending()));
        }

        it "does not duplicate an item a refetch already delivered" {
            let placeholder = Comment::placeholder(ada(), "draft");
            let local_id = placeholder.id.clone();
            state.insert_placeholder(placeholder.into());

            state.set_comments(vec![comment("1", T1), comment("9", T2)]);
            assert!(state.resolve_placeholder(&local_id, comment("9", T2).into()));

            assert_eq!(ids(state.items()), vec!["comment:9", "task:2", "comment:1"]);
            assert_eq!(state.source_items(FeedSource::Comments).map(<[FeedItem]>::len), Some(2));
        }

        it "discards the placeholder of a failed create" {
            let placeholder = Task::placeholder(ada(), "review", vec![ada()], None);
            let local_id = placeholder.id.clone();
            state.insert_placeholder(placeholder.into());

            assert!(state.discard_placeholder(&local_id));
            assert!(!state.discard_placeholder(&local_id));
            assert_eq!(ids(state.items()), vec!["task:2", "comment:1"]);
        }

        it "removes an item once its delete is confirmed" {
            assert!(state.remove_item(ItemKind::Comment, "1"));
            assert!(!state.remove_item(ItemKind::Comment, "1"));

            assert_eq!(ids(state.items()), vec!["task:2"]);
        }
    }

    describe "collapsing" {
        it "groups consecutive uploads after sorting" {
            let mut state = FeedState::default();
            state.set_comments(vec![comment("c", "2024-01-05T00:00:00Z")]);
            state.set_tasks(vec![]);
            state.set_versions(vec![
                version("v1", 1, "2024-01-01T00:00:00Z"),
                version("v3", 3, "2024-01-03T00:00:00Z"),
                version("v2", 2, "2024-01-02T00:00:00Z"),
            ]);

            let entries = state.collapsed();

            assert_eq!(entries.len(), 2);
            assert!(matches!(entries[0], FeedEntry::Item(FeedItem::Comment(_))));
            let FeedEntry::Versions(group) = &entries[1] else {
                panic!("expected version group");
            };
            let order: Vec<u32> = group.versions.iter().map(|v| v.version_number).collect();
            assert_eq!(order, vec![3, 2, 1]);
            assert_eq!((group.version_start, group.version_end), (1, 3));
            assert_eq!(group.collaborators, vec![ada()]);
        }
    }

    describe "actions" {
        before {
            let log: Log = Arc::default();
        }

        it "maps approved to complete and rejected to done" {
            let feed = recording_feed(&log);

            feed.update_task_assignment("t1", "a1", "approved").unwrap();
            feed.update_task_assignment("t1", "a2", "rejected").unwrap();

            assert_eq!(
                entries(&log),
                vec!["assignment:t1:a1:complete", "assignment:t1:a2:done"]
            );
        }

        it "refuses an unknown assignment status" {
            let feed = recording_feed(&log);

            let err = feed
                .update_task_assignment("t1", "a1", "completed")
                .unwrap_err();

            assert_eq!(err, FeedError::UnknownResolution("completed".to_string()));
            assert!(entries(&log).is_empty());
            assert_eq!(resolution_for_status("approved"), Ok(ResolutionState::Complete));
            assert_eq!(resolution_for_status("rejected"), Ok(ResolutionState::Done));
        }

        it "treats missing handlers as no-ops" {
            let mut feed = ActivityFeed::new(
                FeedState::default(),
                FeedHandlers::default(),
                all_permissions(),
            )
            .with_current_user(ada());

            feed.create_comment(CreateCommentArgs {
                text: "hi".to_string(),
                has_mention: false,
            });
            feed.delete_task(DeleteArgs { id: "t1".to_string() });
            feed.update_task(EditTaskArgs {
                id: "t1".to_string(),
                text: "x".to_string(),
            });
            feed.open_version_info(VersionInfoArgs {
                id: "v1".to_string(),
                version_number: 1,
            });
            feed.update_task_assignment("t1", "a1", "approved").unwrap();

            assert!(feed.get_mention_contacts("ad").is_empty());
            assert!(!feed.can_comment());
            assert!(entries(&log).is_empty());
        }

        it "passes actions through to handlers" {
            let mut feed = recording_feed(&log).with_current_user(ada());

            assert!(feed.can_comment());
            feed.focus_input();
            feed.create_comment(CreateCommentArgs {
                text: "hi".to_string(),
                has_mention: false,
            });
            feed.delete_comment(DeleteArgs { id: "c1".to_string() });
            feed.delete_task(DeleteArgs { id: "t1".to_string() });
            feed.open_version_info(VersionInfoArgs {
                id: "v2".to_string(),
                version_number: 2,
            });
            let approvers = feed.get_approver_contacts("Grace").to_vec();

            assert!(!feed.is_input_open());
            assert_eq!(
                entries(&log),
                vec![
                    "comment:create:hi",
                    "comment:delete:c1",
                    "task:delete:t1",
                    "version:2"
                ]
            );
            assert_eq!(approvers, vec![UserRef::new("1", "Grace")]);
            assert_eq!(feed.approver_contacts(), approvers.as_slice());
        }

        it "gates comment and task mutations on permissions" {
            let mut feed = ActivityFeed::new(
                FeedState::default(),
                recording_handlers(&log),
                FeedPermissions::default(),
            );

            feed.create_comment(CreateCommentArgs {
                text: "hi".to_string(),
                has_mention: false,
            });
            feed.delete_comment(DeleteArgs { id: "c1".to_string() });
            feed.delete_task(DeleteArgs { id: "t1".to_string() });
            feed.update_task_assignment("t1", "a1", "approved").unwrap();

            assert_eq!(entries(&log), vec!["assignment:t1:a1:complete"]);
        }

        it "exposes the feed state through the controller" {
            let mut feed = ActivityFeed::new(
                FeedState::default(),
                FeedHandlers::default(),
                FeedPermissions::default(),
            );
            feed.state_mut().set_comments(vec![comment("1", T1)]);
            feed.state_mut().set_tasks(vec![]);
            feed.state_mut().set_versions(vec![]);

            assert_eq!(ids(feed.state().items()), vec!["comment:1"]);
            assert!(entries(&log).is_empty());
        }
    }
}
