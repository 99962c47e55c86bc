// Resume analysis: weak-line detection, scoring, rewrite suggestion, skill overlap,
// advice, and the request pipeline that ties them to the model backends.

pub mod digits;
pub mod handlers;
pub mod pipeline;
pub mod rewrite;
pub mod scoring;
pub mod skills;
pub mod suggestions;
pub mod weak_lines;
