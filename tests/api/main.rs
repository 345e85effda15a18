mod exists;
mod ping;
mod unsubscribe;
