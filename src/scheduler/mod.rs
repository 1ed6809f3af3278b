pub mod auto_events;
