mod auto_event;
mod raid;
mod raid_user;
mod settings;
